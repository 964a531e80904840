use deluxe::ExtractAttributes;
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

pub struct Output {
    pub schema_columns: Vec<String>,
    pub insert_columns: Vec<Ident>,
    pub update_columns: Vec<Ident>,
    pub default_fields: Vec<TokenStream>,
}

#[derive(ExtractAttributes, Default, Debug)]
#[deluxe(attributes(field))]
struct ColumnAttrs {
    size: Option<usize>,
    default: Option<TokenStream>,
}

pub fn process_fields(fields: &syn::punctuated::Punctuated<syn::Field, syn::Token![,]>) -> Output {
    let mut schema_columns = Vec::new();
    let mut insert_columns = Vec::new();
    let mut update_columns = Vec::new();
    let mut default_fields = Vec::new();

    for field in fields {
        let attrs = ColumnAttrs::extract_attributes(&mut field.clone()).unwrap_or_default();
        let field_name = field.ident.clone().expect("field name should be present");
        let inner_type = extract_inner_type(&field.ty);
        let is_nullable = is_option(&field.ty);

        // The base columns carry fixed DDL and application-side defaults.
        let (column, default_value) = match field_name.to_string().as_str() {
            "id" => {
                if inner_type != "String" {
                    panic!("the id column must be a String");
                }
                (
                    "id varchar(60) primary key not null".to_string(),
                    quote! { hbnb_models::new_uuid() },
                )
            }
            stamp @ ("created_at" | "updated_at") => {
                if inner_type != "DateTime" && inner_type != "String" {
                    panic!("the {stamp} column must be a DateTime");
                }
                (
                    format!("{stamp} varchar(40) not null"),
                    quote! { hbnb_models::timestamp() },
                )
            }
            _ => (
                column_schema(&field_name, &inner_type, is_nullable, &attrs),
                column_default(&inner_type, is_nullable, &attrs.default),
            ),
        };

        schema_columns.push(column);
        default_fields.push(quote! { #field_name: #default_value });

        if field_name != "id" {
            update_columns.push(field_name.clone());
        }
        insert_columns.push(field_name);
    }

    for base in ["id", "created_at", "updated_at"] {
        if !insert_columns.iter().any(|column| *column == base) {
            panic!("model structs must declare the {base} column");
        }
    }

    Output {
        schema_columns,
        insert_columns,
        update_columns,
        default_fields,
    }
}

fn sql_type(inner_type: &str, size: Option<usize>) -> String {
    match inner_type {
        "Text" => "text".to_string(),
        "Float" => "float".to_string(),
        "Integer" => "integer".to_string(),
        "DateTime" => "varchar(40)".to_string(),
        "String" => format!("varchar({})", size.unwrap_or(255)),
        other => panic!(
            "Unsupported type: {other}, only 'String' 'Text' 'Integer' 'Float' 'DateTime' are available!"
        ),
    }
}

fn column_schema(
    field_name: &Ident,
    inner_type: &str,
    is_nullable: bool,
    attrs: &ColumnAttrs,
) -> String {
    let mut parts = vec![field_name.to_string(), sql_type(inner_type, attrs.size)];

    if let Some(default) = &attrs.default {
        let value = default.to_string().replace('"', "");
        let clause = match (inner_type, value.as_str()) {
            ("DateTime", "now") => "current_timestamp".to_string(),
            ("Integer", _) | ("Float", _) => value,
            _ => format!("'{value}'"),
        };
        parts.push(format!("default {clause}"));
    }

    if !is_nullable {
        parts.push("not null".to_string());
    }

    parts.join(" ")
}

// Value of the column in the generated `Default` impl.
fn column_default(
    inner_type: &str,
    is_nullable: bool,
    default: &Option<TokenStream>,
) -> TokenStream {
    match default {
        Some(tokens) => {
            let value = tokens.to_string().replace('"', "");
            let rust_value = match (inner_type, value.as_str()) {
                ("DateTime", "now") => quote! { hbnb_models::timestamp() },
                ("Integer", _) | ("Float", _) => tokens.clone(),
                _ => quote! { #value.to_string() },
            };
            if is_nullable {
                quote! { Some(#rust_value) }
            } else {
                rust_value
            }
        }
        None if is_nullable => quote! { None },
        None => match inner_type {
            "Float" => quote! { 0.0 },
            "Integer" => quote! { 0 },
            "String" | "Text" | "DateTime" => quote! { String::default() },
            _ => panic!("Unsupported type for default value"),
        },
    }
}

fn is_option(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(type_path) if type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"))
}

fn extract_inner_type(field_type: &syn::Type) -> String {
    if let syn::Type::Path(type_path) = field_type {
        if let Some(path_segment) = type_path.path.segments.last() {
            if path_segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &path_segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                        return extract_inner_type(inner_type);
                    }
                }
            }
            return path_segment.ident.to_string();
        }
    }
    panic!("Invalid type")
}
