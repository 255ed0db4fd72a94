use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub email: Option<String>,
}
