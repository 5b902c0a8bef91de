//! 固定凭证表：用户名到明文密码的只读映射。

use std::collections::HashMap;

/// 内置演示账号。
const BUILTIN_USERS: [(&str, &str); 3] = [
    ("admin", "admin123"),
    ("user", "user123"),
    ("testuser", "test123"),
];

/// 凭证表，进程启动后不再修改。
#[derive(Debug, Clone)]
pub(crate) struct CredentialStore {
    users: HashMap<String, String>,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::from_pairs(BUILTIN_USERS)
    }
}

impl CredentialStore {
    /// 由 (username, password) 列表构造；重复用户名以后者为准。
    pub(crate) fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: pairs
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    /// 用户存在且密码逐字节相等时返回 true。
    pub(crate) fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored.as_bytes() == password.as_bytes())
    }

    /// 按字典序列出用户名（启动 banner 使用）。
    pub(crate) fn usernames(&self) -> Vec<&str> {
        let mut names = self.users.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}
