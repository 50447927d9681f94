/// HTTPメソッド
///
/// リクエストエンジンが受け付けるメソッドの閉じた集合。
/// 文字列からの変換は大文字小文字を区別せず、集合外の値は即座に拒否する。
use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    /// 正規化された（大文字の）メソッド名
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// パラメータをリクエストボディで送るメソッドか
    ///
    /// GET はクエリ文字列、それ以外はフォームエンコードされたボディ。
    pub fn carries_body(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl FromStr for Method {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(DomainError::unsupported_method(s)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let result = "OPTIONS".parse::<Method>();
        match result {
            Err(DomainError::UnsupportedMethod { method }) => assert_eq!(method, "OPTIONS"),
            other => panic!("Expected UnsupportedMethod, got {:?}", other),
        }
    }

    #[test]
    fn test_only_get_uses_query() {
        assert!(!Method::Get.carries_body());
        assert!(Method::Post.carries_body());
        assert!(Method::Patch.carries_body());
        assert!(Method::Put.carries_body());
        assert!(Method::Delete.carries_body());
    }
}
