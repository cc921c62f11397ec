//! Rendering of finished consultations

pub mod console;
