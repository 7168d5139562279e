pub mod grammar;
pub mod translate;

pub use grammar::GrammarClient;
pub use translate::TranslateClient;
