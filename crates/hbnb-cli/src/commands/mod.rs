pub mod all;
pub mod count;
pub mod create;
pub mod destroy;
pub mod dispatch;
pub mod link;
pub mod related;
pub mod search;
pub mod shared;
pub mod show;
pub mod stats;
pub mod update;
