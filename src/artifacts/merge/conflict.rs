use bytes::Bytes;

const CURRENT_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const GIVEN_MARKER: &[u8] = b">>>>>>>\n";

/// File content written for a path both branches changed differently
///
/// A side without a version of the file contributes nothing between its markers.
pub fn conflict_markers(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CURRENT_MARKER.len() + current.len() + SEPARATOR.len() + given.len() + GIVEN_MARKER.len(),
    );
    content.extend_from_slice(CURRENT_MARKER);
    content.extend_from_slice(current);
    content.extend_from_slice(SEPARATOR);
    content.extend_from_slice(given);
    content.extend_from_slice(GIVEN_MARKER);

    Bytes::from(content)
}
