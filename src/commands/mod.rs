pub mod publish;
pub mod settings;
