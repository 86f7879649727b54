pub mod assets;
pub mod prayer_times;
pub mod push;
pub mod settings;
