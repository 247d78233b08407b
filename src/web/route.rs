//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、受保护路径集合以及登录重定向的构造规则。

use std::fmt::Display;

/// 未登录时禁止进入的路径前缀
///
/// 命中任意前缀（或其子路径）都会被重定向到登录页。
const PROTECTED_PREFIXES: &[&str] = &[
    "/survey",
    "/dataByZip",
    "/dataByMetro",
    "/PageMarket",
    "/user",
    "/dataByPowerbi",
    "/conditionReport/form",
];

/// 登录页路径
pub const LOGIN_PATH: &str = "/login";

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 登录页面，可携带登录成功后的回跳路径
    Login {
        redirect: Option<String>,
    },
    /// 关于页
    About,
    /// 问卷页 (需要认证)
    Survey,
    /// 按 Zipcode 查看市场数据 (需要认证)
    DataByZip,
    /// 按 Metro 查看市场数据 (需要认证)
    DataByMetro,
    /// 市场综合页 (需要认证)
    PageMarket,
    /// PowerBI 报表页 (需要认证)
    DataByPowerbi,
    /// 市场报告问卷表单 (需要认证)
    ConditionReportForm,
    /// 用户中心：不带 id 时为当前用户 (需要认证)
    User(Option<String>),
    /// AI 聊天页
    Chat,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path（可含查询串）解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        match path {
            "/" => Self::Home,
            "/login" => Self::Login {
                redirect: query.and_then(redirect_param),
            },
            "/about" => Self::About,
            "/survey" => Self::Survey,
            "/dataByZip" => Self::DataByZip,
            "/dataByMetro" => Self::DataByMetro,
            "/PageMarket" => Self::PageMarket,
            "/dataByPowerbi" => Self::DataByPowerbi,
            "/conditionReport/form" => Self::ConditionReportForm,
            "/chat" => Self::Chat,
            "/user" => Self::User(None),
            _ => match path.strip_prefix("/user/") {
                Some(id) if !id.is_empty() => Self::User(Some(id.to_string())),
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login { redirect: None } => LOGIN_PATH.to_string(),
            Self::Login {
                redirect: Some(target),
            } => login_redirect(target),
            Self::About => "/about".to_string(),
            Self::Survey => "/survey".to_string(),
            Self::DataByZip => "/dataByZip".to_string(),
            Self::DataByMetro => "/dataByMetro".to_string(),
            Self::PageMarket => "/PageMarket".to_string(),
            Self::DataByPowerbi => "/dataByPowerbi".to_string(),
            Self::ConditionReportForm => "/conditionReport/form".to_string(),
            Self::User(None) => "/user".to_string(),
            Self::User(Some(id)) => format!("/user/{}", id),
            Self::Chat => "/chat".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        is_protected(&self.to_path())
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 判断路径是否属于受保护集合
///
/// 采用锚定的前缀匹配：路径等于某个受保护前缀，
/// 或者是它的子路径（如 `/user/123`）。
pub fn is_protected(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// 构造携带回跳参数的登录页地址
///
/// 原始路径经 URL 编码后放入 `redirect` 查询参数。
pub fn login_redirect(from: &str) -> String {
    format!("{}?redirect={}", LOGIN_PATH, urlencoding::encode(from))
}

/// 登录成功后应回到的页面
///
/// 只有 Login 路由携带回跳参数，其余情况一律回首页。
/// 路由服务的认证监听与登录页的已登录分支都从这里取目标，
/// 保证回跳目标只有一个来源。
pub fn login_return_target(route: &AppRoute) -> String {
    match route {
        AppRoute::Login {
            redirect: Some(target),
        } => target.clone(),
        _ => "/".to_string(),
    }
}

/// 从登录页查询串中取出回跳路径
fn redirect_param(query: &str) -> Option<String> {
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == "redirect" && !value.is_empty() {
                return urlencoding::decode(value).ok().map(|s| s.into_owned());
            }
        }
    }
    None
}
