//! 图表 / 市场数据接口

use homepulse_shared::{CityRecord, MetroRecord, RankQuery, RankRow, StateRecord, ZipcodeRecord};

use crate::request::{ApiContext, ApiResult};

use super::decode;

/// 获取所有州列表
pub async fn get_states_list(ctx: &ApiContext) -> ApiResult<Vec<StateRecord>> {
    decode(ctx.direct().get("/charts/zipcode/states", &[]).await?)
}

/// 获取所有城市列表
pub async fn get_zipcode_cities_list(ctx: &ApiContext) -> ApiResult<Vec<CityRecord>> {
    decode(ctx.direct().get("/charts/zipcode/cities", &[]).await?)
}

/// 获取所有 Metro 列表
pub async fn get_zipcode_metros_list(ctx: &ApiContext) -> ApiResult<Vec<MetroRecord>> {
    decode(ctx.direct().get("/charts/zipcode/metros", &[]).await?)
}

/// 获取所有 Zipcode 列表
pub async fn get_zipcode_list(ctx: &ApiContext) -> ApiResult<Vec<ZipcodeRecord>> {
    decode(ctx.direct().get("/charts/zipcode/zipcode", &[]).await?)
}

/// 计算房价增长率排行
pub async fn growth_rate(ctx: &ApiContext, query: &RankQuery) -> ApiResult<Vec<RankRow>> {
    decode(ctx.direct().post("/charts/zipcode/growth-rate", query).await?)
}

/// 综合排行查询
pub async fn zipcode_rank(ctx: &ApiContext, query: &RankQuery) -> ApiResult<Vec<RankRow>> {
    decode(ctx.direct().post("/charts/zipcode/rank", query).await?)
}
