//! 类型安全的路径参数提取器
//!
//! 直接从路径段解析 i64 ID，非法值统一返回 400 JSON 响应，
//! 避免每个 handler 重复解析与判错。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 定义一个按路径参数名解析 i64 的提取器
macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                match parsed {
                    Some(id) => ready(Ok($name(id))),
                    None => {
                        let response = HttpResponse::BadRequest().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::BadRequest,
                                concat!("路径参数 ", $param, " 必须是正整数"),
                            ),
                        );
                        ready(Err(InternalError::from_response(
                            concat!("invalid path parameter: ", $param),
                            response,
                        )
                        .into()))
                    }
                }
            }
        }
    };
}

define_safe_id_extractor!(SafeIDI64, "id");
define_safe_id_extractor!(SafeScheduleIdI64, "schedule_id");
define_safe_id_extractor!(SafeEvaluationIdI64, "evaluation_id");
define_safe_id_extractor!(SafeTemplateIdI64, "template_id");
