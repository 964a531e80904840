pub type Integer = i32;
pub type Float = f64;
pub type Text = String;
pub type DateTime = String;
