//! Sale document: every bread on offer plus the kibbutz directory

use serde::{Deserialize, Serialize};

use super::bread::Bread;
use super::kibbutz::Kibbutz;
use crate::util::null_as_default;

/// Live state of the current sale as loaded from storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub breads: Vec<Bread>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kibbutzim: Vec<Kibbutz>,
}
