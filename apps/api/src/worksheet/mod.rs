// Worksheet pipeline: settings in, page structure out.
// Characters are resolved through the session cache before the layout engine runs.

pub mod assembler;
pub mod handlers;
pub mod settings;
