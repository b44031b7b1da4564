// Library crate: the editing engine, exposed for the headless runner, integration tests
// and the JSON command interface. A canvas front-end drives it through `interaction`.

pub mod command;
pub mod controls;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod interaction;
pub mod state;
