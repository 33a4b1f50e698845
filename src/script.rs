//! # Registration Snippet
//!
//! Renders a [`Registry`] as the script a documentation page loads to hand the
//! table to its index widget, and reads such a script back.
//!
//! ```text
//! (function() {var implementors = {};
//! implementors["ethcore_db"] = ["impl Drop for Database"];
//!
//! if (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}})()
//! ```

use crate::constants::{PENDING_SLOT_NAME, REGISTER_HOOK_NAME, TABLE_VARIABLE_NAME};
use crate::error::{RegistryError, ScriptError};
use crate::registry::{Descriptor, Registry};
use serde_json::Deserializer;

fn prelude() -> String {
    format!("(function() {{var {TABLE_VARIABLE_NAME} = {{}};")
}

fn epilogue() -> String {
    format!(
        "if (window.{REGISTER_HOOK_NAME}) {{window.{REGISTER_HOOK_NAME}({TABLE_VARIABLE_NAME});}} \
         else {{window.{PENDING_SLOT_NAME} = {TABLE_VARIABLE_NAME};}}}})()"
    )
}

/// Render the registration snippet; groups in sorted order, descriptors as given
pub fn render_script(registry: &Registry) -> Result<String, RegistryError> {
    let mut out = prelude();
    out.push('\n');

    for (group, descriptors) in registry.groups() {
        out.push_str(&format!(
            "{TABLE_VARIABLE_NAME}[{}] = {};\n",
            serde_json::to_string(group)?,
            serde_json::to_string(descriptors)?
        ));
    }

    out.push('\n');
    out.push_str(&epilogue());
    Ok(out)
}

/// Read a snippet produced by [`render_script`] back into a registry
pub fn parse_script(script: &str) -> Result<Registry, ScriptError> {
    let mut lines = script.trim().lines().enumerate();

    match lines.next() {
        Some((_, first)) if first.trim() == prelude() => {}
        _ => return Err(ScriptError::MissingPrelude),
    }

    let epilogue = epilogue();
    let assignment = format!("{TABLE_VARIABLE_NAME}[");
    let mut builder = Registry::builder();
    let mut closed = false;

    for (index, line) in lines {
        let line = line.trim();
        let line_number = index + 1;

        if line.is_empty() {
            continue;
        }
        if closed {
            return Err(malformed(line_number, "content after the registration call"));
        }
        if line == epilogue {
            closed = true;
            continue;
        }

        let rest = line
            .strip_prefix(&assignment)
            .ok_or_else(|| malformed(line_number, "expected a table assignment"))?;
        let (group, descriptors) =
            parse_assignment(rest).map_err(|reason| malformed(line_number, reason))?;

        builder = builder.group(group, descriptors)?;
    }

    if !closed {
        return Err(ScriptError::MissingEpilogue);
    }

    Ok(builder.build())
}

/// Parse `"<group>"] = [<descriptors>];`
fn parse_assignment(rest: &str) -> Result<(String, Vec<Descriptor>), String> {
    let (group, consumed) =
        leading_json::<String>(rest).map_err(|e| format!("invalid group name: {e}"))?;

    let rest = rest[consumed..]
        .trim_start()
        .strip_prefix(']')
        .and_then(|r| r.trim_start().strip_prefix('='))
        .ok_or_else(|| "expected '] ='".to_string())?
        .trim_start();

    let (descriptors, consumed) = leading_json::<Vec<Descriptor>>(rest)
        .map_err(|e| format!("invalid descriptor list: {e}"))?;

    if rest[consumed..].trim() != ";" {
        return Err("expected ';' after descriptor list".to_string());
    }

    Ok((group, descriptors))
}

/// Decode one JSON value from the start of `input`, returning it with the bytes consumed
fn leading_json<T>(input: &str) -> Result<(T, usize), String>
where
    T: serde::de::DeserializeOwned,
{
    let mut stream = Deserializer::from_str(input).into_iter::<T>();
    match stream.next() {
        Some(Ok(value)) => Ok((value, stream.byte_offset())),
        Some(Err(e)) => Err(e.to_string()),
        None => Err("unexpected end of line".to_string()),
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> ScriptError {
    ScriptError::MalformedLine {
        line,
        reason: reason.into(),
    }
}
