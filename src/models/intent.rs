/// Global intent classified from the raw message before any step logic
/// runs. `Cancel` and `List` work at any step; `Book` only matters at
/// `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Cancel the appointment with the given id.
    Cancel(u64),
    /// List the sender's scheduled appointments.
    List,
    /// Start the booking flow.
    Book,
    /// No global intent; the current step interprets the text.
    Unknown,
}
