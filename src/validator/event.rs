use crate::domain::model::{UnitId, UnitKind, Verdict};

/// Observational events emitted while a grid is validated. Consumers log
/// them; they never influence the verdict.
#[derive(Debug, Clone)]
pub enum ValidationEvent {
    /// A single unit finished its check.
    UnitChecked { unit: UnitId, ok: bool },
    /// All nine units of one kind passed.
    ClassValidated(UnitKind),
    /// Validation finished with the final verdict.
    Finished(Verdict),
}
