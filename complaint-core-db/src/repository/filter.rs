use uuid::Uuid;

/// Reified query predicate for listing complaints.
///
/// The access policy builds this from the actor's role: students are scoped
/// to their own submissions, faculty and administrators see everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    /// Restrict to complaints filed by this submitter
    pub submitter_id: Option<Uuid>,
}

impl ComplaintFilter {
    /// No restriction: every complaint matches.
    pub fn all() -> Self {
        ComplaintFilter { submitter_id: None }
    }

    /// Only complaints filed by the given submitter match.
    pub fn submitted_by(submitter_id: Uuid) -> Self {
        ComplaintFilter {
            submitter_id: Some(submitter_id),
        }
    }

    pub fn matches(&self, submitter_id: Uuid) -> bool {
        match self.submitter_id {
            Some(expected) => submitter_id == expected,
            None => true,
        }
    }
}
