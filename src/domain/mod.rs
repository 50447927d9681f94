/// ドメイン層
///
/// ネットワークやファイルシステムの詳細に依存しない規則をまとめる。
pub mod error;
pub mod method;
pub mod scopes;
pub mod validator;

pub use method::Method;
pub use scopes::Scopes;
