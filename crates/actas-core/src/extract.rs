//! Locates the acta attachment in a mesa response.

use crate::fetch::MesaResponse;

/// Attachment type tag carrying the scanned tally sheet.
pub const ACTA_TIPO: &str = "ACTA";

/// Payload of the first attachment tagged `ACTA`, if it has one.
///
/// Returns `None` when no attachment carries the tag or the tagged entry's
/// payload is empty or absent. Both are normal for some mesas, not errors.
pub fn find_acta(response: &MesaResponse) -> Option<&str> {
    response
        .adjunto
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .find(|adjunto| adjunto.tipo.as_deref() == Some(ACTA_TIPO))
        .and_then(|adjunto| adjunto.valor.as_deref())
        .filter(|valor| !valor.is_empty())
}
