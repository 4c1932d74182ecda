use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON error body shared by HTTP error responses.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
