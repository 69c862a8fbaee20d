//! Name derivation from dotted module identifiers.

/// Prefix of every generated editor module name
pub const MODULE_PREFIX: &str = "UnrealPy";

/// Title-case `s`: the first letter of every alphabetic run is upper-cased
/// and the rest lower-cased, so `asset_registry` becomes `Asset_Registry`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Replace anything that may not appear in a build-rules class name
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Split a dotted identifier into its slash-joined package path and simple name.
///
/// `a.b.asset_registry` gives `("a/b", "asset_registry")`; a bare name has an
/// empty path.
pub fn split_identifier(identifier: &str) -> (String, &str) {
    match identifier.rsplit_once('.') {
        Some((package, name)) => (package.replace('.', "/"), name),
        None => (String::new(), identifier),
    }
}

/// Generated editor module name for a package path and simple name.
///
/// The root package is dropped from the path when it has more than one
/// segment, so `a/b` + `asset_registry` gives `UnrealPy_B_Asset_Registry`
/// while `unreal` + `math` gives `UnrealPy_Unreal_Math`.
pub fn generated_module_name(path: &str, name: &str) -> String {
    let package = match path.split_once('/') {
        Some((_root, rest)) => rest,
        None => path,
    };

    let package = sanitize(&title_case(&package.replace('/', " ")));
    let name = sanitize(&title_case(name));

    format!("{}_{}_{}", MODULE_PREFIX, package, name)
}
