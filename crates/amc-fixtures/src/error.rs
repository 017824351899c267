/// Errors raised while assembling a fixture catalog.
///
/// The writer refuses inputs that could not have come out of the
/// catalog format, so a failing decode test points at the decoder and
/// not at a malformed fixture.
///
/// ```text
///   FixtureError
///   ├── HeaderTextTooLong   ← header text would run into the payload
///   └── CustomValueCount    ← movie values do not match the schema
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("header text is {len} bytes, limit {limit}")]
    HeaderTextTooLong { len: usize, limit: usize },

    #[error("movie #{number} has {actual} custom values but the schema defines {expected}")]
    CustomValueCount {
        number: i32,
        expected: usize,
        actual: usize,
    },
}
