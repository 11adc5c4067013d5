pub mod binding;
pub mod cache;
pub mod completion;
pub mod error;
pub mod param;
pub mod parsed_args;
pub mod registry;
pub mod token_stream;

// Re-export main types
pub use binding::{CompleterBinding, CompleterKind, DEFAULT_ID, canonical_id};
pub use cache::CachedCompleter;
pub use completion::{AsyncCompleter, Completion, Context, filter_completions};
pub use error::{CompletionError, ParseError, RegistryError, UnusedArguments};
pub use param::{CommandSpec, ParamSpec};
pub use parsed_args::ParsedArgs;
pub use registry::{CompleterRegistry, SharedCompleter};
pub use token_stream::TokenStream;

// Re-export async_trait for downstream completer impls
pub use async_trait;
