/// Outcome of asking the verification service about one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Valid,
    Invalid,
    /// The service could not give an answer. Submissions proceed as if valid.
    Indeterminate(String),
}
