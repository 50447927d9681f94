/// OAuth2 スコープ
///
/// スペース区切りの単一文字列、または順序付きのスコープ名列から作成できる。
/// 列の場合は与えられた順序のまま半角スペース1つで連結し、正規の文字列形式にする。
/// スコープ名そのものの検証は行わない。
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scopes(String);

impl Scopes {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn join<S: AsRef<str>>(scopes: &[S]) -> Self {
        let joined = scopes
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined)
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scopes {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Scopes {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Scopes {
    fn from(value: Vec<S>) -> Self {
        Self::join(&value)
    }
}

impl<S: AsRef<str>> From<&[S]> for Scopes {
    fn from(value: &[S]) -> Self {
        Self::join(value)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Scopes {
    fn from(value: [S; N]) -> Self {
        Self::join(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_joined_in_order() {
        let scopes = Scopes::from(["a", "b", "c"]);
        assert_eq!(scopes.as_str(), "a b c");

        let scopes = Scopes::from(vec!["manage_videos".to_string(), "email".to_string()]);
        assert_eq!(scopes.as_str(), "manage_videos email");
    }

    #[test]
    fn test_string_is_kept_verbatim() {
        let scopes = Scopes::from("userinfo  email");
        assert_eq!(scopes.as_str(), "userinfo  email");
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [&str; 0] = [];
        assert_eq!(Scopes::from(empty).as_str(), "");
    }
}
