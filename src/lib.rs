//! Task time tracking: users own tasks, tasks accumulate tracker entries
//! (one per working session), and each entry carries an hours figure that is
//! either recomputed from its timestamps or assigned by the caller.

pub mod commands;
pub mod db;
pub mod hours;
pub mod models;
pub mod tracker;
