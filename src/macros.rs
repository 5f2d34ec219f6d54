/// Builds a [`StepId`](crate::StepId) from the current source file and the
/// given function signature.
///
/// ```
/// let id = stepvisor::step_id!("import_photos()");
/// assert_eq!(id.signature(), "import_photos()");
/// ```
#[macro_export]
macro_rules! step_id {
    ($signature:expr) => {
        $crate::StepId::new(file!(), $signature)
    };
}
