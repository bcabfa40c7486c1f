//! Shared helpers for working with `figment::Jail` in tests.
//!
//! Runs a closure inside a jail (which isolates the working directory and any
//! environment variables it sets) and hands its output back as an
//! `anyhow::Result`.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure returns a
/// [`figment::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// a jail closure boundary with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over owned errors from map_err"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_closure_output() -> Result<()> {
        let value = with_jail(|jail| {
            jail.create_file("probe.toml", "x = 1")?;
            Ok(7)
        })?;
        assert_eq!(value, 7);
        Ok(())
    }

    #[test]
    fn surfaces_closure_errors() {
        let outcome: Result<()> = with_jail(|_| Err(figment_error("nope")));
        assert!(outcome.is_err_and(|err| err.to_string().contains("nope")));
    }
}
