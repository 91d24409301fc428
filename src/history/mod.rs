//! Learning history commands over the session store.

pub mod commands;
