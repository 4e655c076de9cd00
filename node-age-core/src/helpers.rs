use std::any::type_name;

use chrono::Duration;
use kube::Resource;

pub fn pretty_type_name<'a, T>() -> &'a str {
    type_name::<T>().split("::").last().unwrap_or_default()
}

/// Renders an age as `31d4h12m`, keeping the sign of negative (skewed) ages.
pub fn format_age(age: Duration) -> String {
    let sign = if age < Duration::zero() { "-" } else { "" };
    let minutes = age.num_minutes().unsigned_abs();

    let days = minutes / (24 * 60);
    let hours = minutes / 60 % 24;
    let minutes = minutes % 60;

    format!("{sign}{days}d{hours}h{minutes}m")
}

pub trait RequireMetadata<E> {
    fn require_name_or(&self, error: E) -> Result<&str, E>;
}

impl<T: Resource, E> RequireMetadata<E> for T {
    fn require_name_or(&self, error: E) -> Result<&str, E> {
        Ok(self.meta().name.as_ref().ok_or(error)?.as_str())
    }
}
