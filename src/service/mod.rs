pub mod method_resolver;
pub mod notification_actor;
pub mod notification_loop;
pub mod notifier;
