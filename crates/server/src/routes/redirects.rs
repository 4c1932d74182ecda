use axum::http::HeaderMap;

use crate::errors::RedirectError;
use crate::redirect::{redirect, redirect_referer, SeeOther};

/// Old catalog URL; relative target resolves next to it.
pub async fn legacy_catalog() -> Result<SeeOther, RedirectError> {
    redirect(["items"])
}

pub async fn back(headers: HeaderMap) -> SeeOther {
    redirect_referer(&headers)
}
