use actix_web::HttpMessage;

use crate::error::ApiError;

/// Largest request body any handler (or the access log) will buffer.
pub(crate) const BODY_LIMIT: usize = 2 * 1024 * 1024;

fn is_json(req: &actix_web::HttpRequest) -> bool {
    let essence = req.content_type().split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

/// Decodes a create body the way a lenient JSON body parser would: a missing
/// body, or one that is not declared as JSON, reads as `{}` so the field
/// checks report what is missing. A JSON body that does not fit `T` is a
/// validation error.
pub(crate) fn json_or_default<T>(
    req: &actix_web::HttpRequest,
    body: &[u8],
) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.is_empty() || !is_json(req) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|error| ApiError::Validation(error.to_string()))
}
