//! A structured description of the stub headers placed in the sysroot.
//!
//! Every header is a closed list of [`Declaration`]s. The list is rendered to
//! the C text written into the sysroot, and it can expand invocations of the
//! substituted macros the way the C preprocessor would for that text.

use crate::error::{Arity, ExpandError};

/// The replacement text of a substituted function-like macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Zero,
    Null,
}

impl Expansion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Expansion::Zero => "0",
            Expansion::Null => "NULL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// `#define NAME replacement`
    ObjectMacro {
        name: &'static str,
        replacement: &'static str,
    },
    /// `typedef target NAME;`
    Typedef {
        name: &'static str,
        target: &'static str,
    },
    /// `typedef struct {} NAME;`
    OpaqueStruct { name: &'static str },
    /// Declared here, defined in another translation unit.
    ExternVariable {
        name: &'static str,
        ty: &'static str,
    },
    /// A real prototype. Calls stay calls and need a definition at link time.
    ExternFunction {
        name: &'static str,
        ret: &'static str,
        params: &'static [&'static str],
        variadic: bool,
    },
    /// A function-like macro that throws its arguments away.
    StubMacro {
        name: &'static str,
        params: &'static [&'static str],
        variadic: bool,
        expansion: Expansion,
    },
}

impl Declaration {
    pub const fn name(&self) -> &'static str {
        match self {
            Declaration::ObjectMacro { name, .. }
            | Declaration::Typedef { name, .. }
            | Declaration::OpaqueStruct { name }
            | Declaration::ExternVariable { name, .. }
            | Declaration::ExternFunction { name, .. }
            | Declaration::StubMacro { name, .. } => *name,
        }
    }

    /// Whether a linker has to find a definition for this name elsewhere.
    pub const fn is_extern(&self) -> bool {
        matches!(
            self,
            Declaration::ExternVariable { .. } | Declaration::ExternFunction { .. }
        )
    }

    // Consecutive declarations of the same section are rendered without a
    // blank line between them.
    fn section(&self) -> u8 {
        match self {
            Declaration::ObjectMacro { .. } => 0,
            Declaration::Typedef { .. } | Declaration::OpaqueStruct { .. } => 1,
            Declaration::ExternVariable { .. } => 2,
            Declaration::ExternFunction { .. } | Declaration::StubMacro { .. } => 3,
        }
    }

    fn render(&self) -> String {
        match self {
            Declaration::ObjectMacro { name, replacement } => {
                format!("#define {} {}", name, replacement)
            }
            Declaration::Typedef { name, target } => format!("typedef {} {};", target, name),
            Declaration::OpaqueStruct { name } => format!("typedef struct {{}} {};", name),
            Declaration::ExternVariable { name, ty } => format!("extern {}{};", ty, name),
            Declaration::ExternFunction {
                name,
                ret,
                params,
                variadic,
            } => format!("{} {}({});", ret, name, parameter_list(params, *variadic)),
            Declaration::StubMacro {
                name,
                params,
                variadic,
                expansion,
            } => format!(
                "#define {}({}) {}",
                name,
                parameter_list(params, *variadic),
                expansion.as_str()
            ),
        }
    }
}

fn parameter_list(params: &[&str], variadic: bool) -> String {
    let mut list = params.join(", ");
    if variadic {
        if !list.is_empty() {
            list.push_str(", ");
        }
        list.push_str("...");
    }
    list
}

/// A stub header: its file name inside the sysroot, its include guard and
/// what it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubHeader {
    file_name: &'static str,
    guard: &'static str,
    declarations: &'static [Declaration],
}

/// Every header a sysroot is made of.
pub const HEADERS: &[StubHeader] = &[StubHeader::STDIO];

impl StubHeader {
    pub const STDIO: StubHeader = StubHeader {
        file_name: "stdio.h",
        guard: "_STDIO_H",
        declarations: &[
            Declaration::ObjectMacro {
                name: "NULL",
                replacement: "((void*)0)",
            },
            Declaration::Typedef {
                name: "size_t",
                target: "unsigned long",
            },
            Declaration::OpaqueStruct { name: "FILE" },
            Declaration::ExternVariable {
                name: "stderr",
                ty: "FILE *",
            },
            Declaration::ExternFunction {
                name: "fprintf",
                ret: "int",
                params: &["FILE* stream", "const char* format"],
                variadic: true,
            },
            Declaration::StubMacro {
                name: "snprintf",
                params: &["str", "size", "format"],
                variadic: true,
                expansion: Expansion::Zero,
            },
            Declaration::StubMacro {
                name: "vsnprintf",
                params: &["str", "size", "format", "ap"],
                variadic: false,
                expansion: Expansion::Zero,
            },
            Declaration::StubMacro {
                name: "fputs",
                params: &["s", "stream"],
                variadic: false,
                expansion: Expansion::Zero,
            },
            Declaration::StubMacro {
                name: "fputc",
                params: &["c", "stream"],
                variadic: false,
                expansion: Expansion::Zero,
            },
            Declaration::StubMacro {
                name: "fdopen",
                params: &["fd", "mode"],
                variadic: false,
                expansion: Expansion::Null,
            },
            Declaration::StubMacro {
                name: "fclose",
                params: &["stream"],
                variadic: false,
                expansion: Expansion::Zero,
            },
        ],
    };

    pub const fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub const fn guard(&self) -> &'static str {
        self.guard
    }

    pub const fn declarations(&self) -> &'static [Declaration] {
        self.declarations
    }

    pub fn get(&self, name: &str) -> Option<&'static Declaration> {
        self.declarations.iter().find(|decl| decl.name() == name)
    }

    /// The substituted macros.
    pub fn stubs(&self) -> impl Iterator<Item = &'static Declaration> {
        self.declarations
            .iter()
            .filter(|decl| matches!(decl, Declaration::StubMacro { .. }))
    }

    /// Names that must be defined exactly once elsewhere in the final link.
    pub fn externs(&self) -> impl Iterator<Item = &'static str> {
        self.declarations
            .iter()
            .filter(|decl| decl.is_extern())
            .map(Declaration::name)
    }

    /// The C text of the header.
    pub fn render(&self) -> String {
        let mut out = format!("#ifndef {0}\n#define {0}\n", self.guard);
        let mut previous = None;
        for decl in self.declarations {
            if previous != Some(decl.section()) {
                out.push('\n');
                previous = Some(decl.section());
            }
            out.push_str(&decl.render());
            out.push('\n');
        }
        out.push_str("\n#endif\n");
        out
    }

    /// Expands one invocation of a substituted macro, e.g. `fputc('x', stderr)`,
    /// to its replacement text.
    pub fn expand(&self, call: &str) -> Result<&'static str, ExpandError> {
        let (name, args) = split_invocation(call)?;
        let (params, variadic, expansion) = match self.get(name) {
            Some(Declaration::StubMacro {
                params,
                variadic,
                expansion,
                ..
            }) => (params, *variadic, *expansion),
            Some(_) => return Err(ExpandError::NotAStub(name.to_owned())),
            None => return Err(ExpandError::UnknownMacro(name.to_owned())),
        };

        let arity = if variadic {
            Arity::AtLeast(params.len())
        } else {
            Arity::Exactly(params.len())
        };
        if !arity.accepts(args.len()) {
            return Err(ExpandError::Arity {
                name: name.to_owned(),
                expected: arity,
                found: args.len(),
            });
        }
        Ok(expansion.as_str())
    }

    /// Like [`expand`](Self::expand), with object-like macros in the result
    /// replaced as well, so `fdopen(1, "w")` becomes `((void*)0)`.
    pub fn expand_fully(&self, call: &str) -> Result<&'static str, ExpandError> {
        let expanded = self.expand(call)?;
        match self.get(expanded) {
            Some(Declaration::ObjectMacro { replacement, .. }) => Ok(*replacement),
            _ => Ok(expanded),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Splits `name(a, b, ...)` into the macro name and its arguments. Only
/// parentheses group commas, as in the C preprocessor; string and character
/// literals and comments are skipped over.
fn split_invocation(call: &str) -> Result<(&str, Vec<&str>), ExpandError> {
    let malformed = || ExpandError::Malformed(call.to_owned());

    let call = call.trim();
    let open = call.find('(').ok_or_else(malformed)?;
    let name = call[..open].trim_end();
    if !is_identifier(name) {
        return Err(malformed());
    }

    let body = &call[open + 1..];
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut quote = None;
    let mut escaped = false;
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut prev = ' ';
                loop {
                    match chars.next() {
                        Some((_, '/')) if prev == '*' => break,
                        Some((_, next)) => prev = next,
                        None => return Err(malformed()),
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                while chars.next_if(|&(_, next)| next != '\n').is_some() {}
            }
            '(' => depth += 1,
            ')' if depth == 0 => {
                if !body[i + 1..].trim().is_empty() {
                    return Err(malformed());
                }
                args.push(body[start..i].trim());
                return Ok((name, args));
            }
            ')' => depth -= 1,
            ',' if depth == 0 => {
                args.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    Err(malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bundled_header() {
        assert_eq!(StubHeader::STDIO.render(), wasm_sysroot_sys::STDIO_H);
    }

    #[test]
    fn every_stub_expands_to_a_constant() {
        let header = StubHeader::STDIO;
        assert_eq!(header.expand("snprintf(buf, sizeof buf, \"%d\", x)"), Ok("0"));
        assert_eq!(header.expand("vsnprintf(buf, n, fmt, ap)"), Ok("0"));
        assert_eq!(header.expand("fputs(\"a, b\", stderr)"), Ok("0"));
        assert_eq!(header.expand("fputc(c, stream)"), Ok("0"));
        assert_eq!(header.expand("fdopen(fd, \"w\")"), Ok("NULL"));
        assert_eq!(header.expand("fclose(stream)"), Ok("0"));
        assert_eq!(header.expand_fully("fdopen(2, mode)"), Ok("((void*)0)"));
        assert_eq!(header.expand_fully("fclose(f)"), Ok("0"));
    }

    #[test]
    fn splits_only_at_top_level_commas() {
        let (name, args) = split_invocation("fputc(f(a, b), (x, y))").unwrap();
        assert_eq!(name, "fputc");
        assert_eq!(args, ["f(a, b)", "(x, y)"]);

        let (_, args) = split_invocation(r#"fputs("(\",", ',')"#).unwrap();
        assert_eq!(args, [r#""(\",""#, "','"]);

        // Brackets do not group, as in the C preprocessor.
        let (_, args) = split_invocation("fclose(a[1, 2])").unwrap();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn commas_in_comments_do_not_split() {
        let header = StubHeader::STDIO;
        assert_eq!(header.expand("fputc(a /* , */, b)"), Ok("0"));
        assert_eq!(header.expand("fputc(a /* ) */, b)"), Ok("0"));
        assert_eq!(header.expand("fputc(a, // ,\n b)"), Ok("0"));
        assert_eq!(header.expand("fputs(\"/* , */\", s)"), Ok("0"));
        assert!(matches!(header.expand("fputc(a /* , b)"), Err(ExpandError::Malformed(_))));
    }

    #[test]
    fn variadic_arity() {
        let header = StubHeader::STDIO;
        assert_eq!(header.expand("snprintf(a, b, c)"), Ok("0"));
        assert_eq!(header.expand("snprintf(a, b, c, d, e, f)"), Ok("0"));
        assert_eq!(
            header.expand("snprintf(a, b)"),
            Err(ExpandError::Arity {
                name: "snprintf".to_owned(),
                expected: Arity::AtLeast(3),
                found: 2,
            })
        );
        assert_eq!(
            header.expand("fputc(a)"),
            Err(ExpandError::Arity {
                name: "fputc".to_owned(),
                expected: Arity::Exactly(2),
                found: 1,
            })
        );
    }

    #[test]
    fn empty_argument_counts() {
        // `fclose()` passes one empty argument.
        assert_eq!(StubHeader::STDIO.expand("fclose()"), Ok("0"));
        assert!(StubHeader::STDIO.expand("fputc()").is_err());
    }

    #[test]
    fn rejects_non_stubs() {
        let header = StubHeader::STDIO;
        assert_eq!(
            header.expand("fprintf(stderr, \"x\")"),
            Err(ExpandError::NotAStub("fprintf".to_owned()))
        );
        assert_eq!(
            header.expand("printf(\"x\")"),
            Err(ExpandError::UnknownMacro("printf".to_owned()))
        );
        assert!(matches!(header.expand("fputc(a, b"), Err(ExpandError::Malformed(_))));
        assert!(matches!(header.expand("fputc(a, b) + 1"), Err(ExpandError::Malformed(_))));
        assert!(matches!(header.expand("1fputc(a, b)"), Err(ExpandError::Malformed(_))));
        assert!(matches!(header.expand("fputc"), Err(ExpandError::Malformed(_))));
    }

    #[test]
    fn externs_are_the_real_declarations() {
        let externs: Vec<_> = StubHeader::STDIO.externs().collect();
        assert_eq!(externs, ["stderr", "fprintf"]);
        assert_eq!(StubHeader::STDIO.stubs().count(), 6);
        assert!(StubHeader::STDIO.stubs().all(|decl| !decl.is_extern()));
    }
}
