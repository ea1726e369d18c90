/// Static assets and the index page
pub mod assets;
/// Contact form submissions
pub mod contact;
