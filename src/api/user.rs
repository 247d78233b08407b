//! 用户 / 会话接口

use homepulse_shared::{LoginData, LoginRequest};

use crate::request::{ApiContext, ApiResult};

use super::decode;

/// 登录，返回会话 token
pub async fn login(ctx: &ApiContext, request: &LoginRequest) -> ApiResult<LoginData> {
    let fields = [
        ("email", request.email.as_str()),
        ("password", request.password.as_str()),
    ];
    decode(ctx.client().post("/user/login", &fields).await?)
}

/// 登出，后端作废当前 token
pub async fn logout(ctx: &ApiContext) -> ApiResult<()> {
    ctx.client().post("/user/logout", &[]).await?;
    Ok(())
}

/// 更新用户资料（表单字段按 x-www-form-urlencoded 提交）
pub async fn update_profile(
    ctx: &ApiContext,
    fields: &[(&str, Option<&str>)],
) -> ApiResult<()> {
    ctx.client().put("/user/profile", fields).await?;
    Ok(())
}
