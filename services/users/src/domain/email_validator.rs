/// メールアドレスの形式検証
use regex::Regex;
use std::sync::OnceLock;

/// メールアドレスの最小長（バイト）
pub const EMAIL_MIN_LENGTH: usize = 3;

/// メールアドレスの最大長（バイト）
pub const EMAIL_MAX_LENGTH: usize = 254;

/// ローカル部1-64文字 + `@` + ハイフン区切り可能な1-63文字のドメインラベル列
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]{1,64}@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(EMAIL_PATTERN)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// メールアドレスバリデータ
///
/// 副作用を持たない純粋な判定のみを提供する。
pub struct EmailValidator;

impl EmailValidator {
    /// メールアドレスとして有効かを判定
    ///
    /// チェック順序（最初の失敗で打ち切り）:
    /// 1. 長さが3以上254以下
    /// 2. メールアドレスのパターンに一致
    pub fn is_valid(candidate: &str) -> bool {
        if candidate.len() < EMAIL_MIN_LENGTH || candidate.len() > EMAIL_MAX_LENGTH {
            return false;
        }

        email_regex().is_match(candidate)
    }
}
