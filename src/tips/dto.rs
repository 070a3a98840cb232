use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Deserialize)]
pub struct GenerateTipsRequest {
    pub date: Date,
}

#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    pub date: Date,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub date: Date,
    pub tips: Vec<String>,
}
