//! 缓存层
//!
//! ObjectCache 插件机制：各后端在编译进来时通过 ctor 自注册，
//! 启动时按配置的 `cache.type` 取用，失败回退内存缓存。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并自注册一个 ObjectCache 插件
///
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $backend:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $backend:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let backend = $backend::new()
                                .map_err($crate::errors::DefSystemError::cache_connection)?;
                            Ok(Box::new(backend) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
