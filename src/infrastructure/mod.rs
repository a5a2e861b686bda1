//! Infrastructure layer - outbound HTTP collaborators

pub mod altfins;
pub mod telegram;
