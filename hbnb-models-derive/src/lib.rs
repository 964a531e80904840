use deluxe::ExtractAttributes;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod process;

#[derive(ExtractAttributes, Default)]
#[deluxe(attributes(model))]
struct ModelOpts {
    table: Option<String>,
}

#[proc_macro_derive(Model, attributes(model, field))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);
    let opts = ModelOpts::extract_attributes(&mut input).unwrap_or_default();
    let name = input.ident.clone();

    let fields = match input.data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => panic!("Model derive macro only supports structs with named fields"),
        },
        _ => panic!("Model derive macro only supports structs"),
    };

    let process::Output {
        schema_columns,
        insert_columns,
        update_columns,
        default_fields,
    } = process::process_fields(fields);

    let table = opts.table.unwrap_or_else(|| name.to_string());

    let up = format!(
        "create table if not exists {table} ({});",
        schema_columns.join(", ")
    );
    let down = format!("drop table if exists {table};");

    let insert_sql = {
        let columns = insert_columns
            .iter()
            .map(|column| column.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=insert_columns.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("insert into {table} ({columns}) values ({placeholders});")
    };

    let update_sql = {
        let assignments = update_columns
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column}=?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "update {table} set {assignments} where id=?{};",
            update_columns.len() + 1
        )
    };

    let delete_sql = format!("delete from {table} where id=?1;");

    let expanded = quote! {
        #[hbnb_models::async_trait::async_trait]
        impl hbnb_models::db::model::Model for #name {
            const CLASS: &'static str = stringify!(#name);
            const NAME: &'static str = #table;
            const PK: &'static str = "id";
            const UP: &'static str = #up;
            const DOWN: &'static str = #down;

            async fn insert(&self, conn: &hbnb_models::Connection) -> Result<(), hbnb_models::Error> {
                let query = #insert_sql.replace('?', hbnb_models::PLACEHOLDER);
                hbnb_models::sqlx::query(&query)
                    #(.bind(self.#insert_columns.clone()))*
                    .execute(conn)
                    .await?;
                Ok(())
            }

            async fn update(&self, conn: &hbnb_models::Connection) -> Result<u64, hbnb_models::Error> {
                let query = #update_sql.replace('?', hbnb_models::PLACEHOLDER);
                let done = hbnb_models::sqlx::query(&query)
                    #(.bind(self.#update_columns.clone()))*
                    .bind(self.id.clone())
                    .execute(conn)
                    .await?;
                Ok(done.rows_affected())
            }

            async fn remove(&self, conn: &hbnb_models::Connection) -> Result<(), hbnb_models::Error> {
                let query = #delete_sql.replace('?', hbnb_models::PLACEHOLDER);
                hbnb_models::sqlx::query(&query)
                    .bind(self.id.clone())
                    .execute(conn)
                    .await?;
                Ok(())
            }
        }

        impl hbnb_models::base::BaseModel for #name {
            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> &str {
                &self.created_at
            }

            fn updated_at(&self) -> &str {
                &self.updated_at
            }

            fn set_updated_at(&mut self, stamp: String) {
                self.updated_at = stamp;
            }
        }

        impl ::std::default::Default for #name {
            fn default() -> Self {
                Self { #(#default_fields),* }
            }
        }

        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let attrs = hbnb_models::serde_json::json!(self);
                write!(f, "[{}] ({}) {}", stringify!(#name), self.id, attrs)
            }
        }

        hbnb_models::inventory::submit! {
            hbnb_models::MigrationRegistrar {
                migrate_fn: <#name as hbnb_models::db::model::Model>::migrate
            }
        }
    };

    expanded.into()
}
