//! Syntax descriptors and the registry used to select them.
//!
//! A [`Syntax`] describes just enough about a language to drive the highlighter:
//! lists of keywords, types and constants, a single-line comment marker, and flags
//! that enable highlighting of numbers and strings. Descriptors are immutable once
//! registered and are shared by reference.
//!
//! The [`Registry`] maps file extensions to descriptors. A built-in descriptor for C
//! is always present, and additional descriptors may be loaded from external files
//! formatted according to the [TOML specification](https://toml.io), such as the
//! following:
//!
//! ```toml
//! name = "rust"
//! extensions = ["rs"]
//! keywords = ["fn", "let", "mut", "if", "else", "match"]
//! types = ["u8", "usize", "bool"]
//! consts = ["true", "false", "None"]
//! comment = "//"
//! ```

use crate::error::{Error, Result};
use crate::sys::{self, AsString};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

/// A syntax descriptor.
#[derive(Debug)]
pub struct Syntax {
    /// The canonical name of the language, which is shown in the status line.
    pub name: String,

    /// File extensions, without the leading `.`, that select this syntax.
    pub extensions: Vec<String>,

    pub keywords: Vec<String>,
    pub types: Vec<String>,
    pub consts: Vec<String>,

    /// Marker that starts a comment extending to the end of the row.
    pub comment: Option<String>,

    /// Enables highlighting of numeric literals.
    pub numbers: bool,

    /// Enables highlighting of single and double quoted strings.
    pub strings: bool,
}

pub type SyntaxRef = Rc<Syntax>;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalSyntax {
    name: String,
    extensions: Vec<String>,
    keywords: Option<Vec<String>>,
    types: Option<Vec<String>>,
    consts: Option<Vec<String>>,
    comment: Option<String>,
    numbers: Option<bool>,
    strings: Option<bool>,
}

impl From<ExternalSyntax> for Syntax {
    fn from(ext: ExternalSyntax) -> Syntax {
        Syntax {
            name: ext.name,
            extensions: ext.extensions,
            keywords: ext.keywords.unwrap_or_default(),
            types: ext.types.unwrap_or_default(),
            consts: ext.consts.unwrap_or_default(),
            comment: ext.comment.filter(|c| c.len() > 0),
            numbers: ext.numbers.unwrap_or(true),
            strings: ext.strings.unwrap_or(true),
        }
    }
}

impl Syntax {
    /// Returns the built-in descriptor for C and C++.
    pub fn c() -> Syntax {
        fn to_vec(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Syntax {
            name: "c".to_string(),
            extensions: to_vec(&C_EXTENSIONS),
            keywords: to_vec(&C_KEYWORDS),
            types: to_vec(&C_TYPES),
            consts: to_vec(&C_CONSTS),
            comment: Some("//".to_string()),
            numbers: true,
            strings: true,
        }
    }
}

const C_EXTENSIONS: [&str; 3] = ["c", "h", "cpp"];

const C_KEYWORDS: [&str; 31] = [
    "switch",
    "if",
    "while",
    "for",
    "break",
    "continue",
    "return",
    "else",
    "struct",
    "union",
    "typedef",
    "static",
    "enum",
    "class",
    "using",
    "namespace",
    "case",
    "const",
    "inline",
    "auto",
    "constexpr",
    "template",
    "typename",
    "#include",
    "#pragma",
    "#define",
    "#if",
    "#ifdef",
    "#ifndef",
    "#elif",
    "#endif",
];

const C_TYPES: [&str; 11] = [
    "void",
    "char",
    "bool",
    "short",
    "int",
    "size_t",
    "ssize_t",
    "ptrdiff_t",
    "long",
    "float",
    "double",
];

const C_CONSTS: [&str; 3] = ["true", "false", "NULL"];

/// A registry of syntax descriptors keyed by name, and a secondary map of file
/// extensions to names.
pub struct Registry {
    syntax_map: IndexMap<String, SyntaxRef>,
    ext_map: HashMap<String, String>,
}

impl Registry {
    /// Directory relative to `$HOME` that is searched for syntax files by
    /// [`load`](Self::load).
    const SYNTAX_DIR: &str = ".hed/syntax";

    /// Returns an empty registry.
    pub fn new() -> Registry {
        Registry {
            syntax_map: IndexMap::new(),
            ext_map: HashMap::new(),
        }
    }

    /// Returns the default registry extended with syntax files found in
    /// `$HOME/.hed/syntax`, if that directory exists.
    pub fn load() -> Result<Registry> {
        let dir = sys::home_dir().join(Self::SYNTAX_DIR);
        if sys::is_dir(&dir) {
            Self::load_dir(&dir)
        } else {
            Ok(Registry::default())
        }
    }

    /// Returns the default registry extended with all syntax files in `dir`, which
    /// are expected to end with `.toml`.
    ///
    /// A syntax file whose name matches an existing descriptor replaces it.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Registry> {
        let dir = dir.as_ref();
        if !sys::is_dir(dir) {
            return Err(Error::io(
                &dir.as_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "syntax directory not found"),
            ));
        }

        let mut registry = Registry::default();
        for path in sys::list_dir(dir) {
            if path.extension().is_some_and(|ext| ext == "toml") {
                let syntax = Self::read_file(&path)?;
                debug!(path = %path.as_string(), name = %syntax.name, "syntax loaded");
                registry.add(syntax);
            }
        }
        info!(
            dir = %dir.as_string(),
            syntaxes = ?registry.syntaxes().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "syntax registry loaded"
        );
        Ok(registry)
    }

    /// Adds `syntax` to the registry, replacing any descriptor with the same name
    /// and claiming all of its extensions.
    pub fn add(&mut self, syntax: Syntax) {
        if let Some(prior) = self.syntax_map.get(&syntax.name) {
            for ext in prior.extensions.iter() {
                self.ext_map.remove(ext);
            }
        }
        for ext in syntax.extensions.iter() {
            self.ext_map.insert(ext.clone(), syntax.name.clone());
        }
        self.syntax_map.insert(syntax.name.clone(), Rc::new(syntax));
    }

    /// Returns the descriptor associated with the file extension `ext`.
    pub fn find(&self, ext: &str) -> Option<SyntaxRef> {
        self.ext_map
            .get(ext)
            .and_then(|name| self.syntax_map.get(name))
            .cloned()
    }

    /// Returns the descriptor whose extension matches the substring following the
    /// last `.` in `path`, or `None` if `path` has no such extension.
    pub fn find_for_path(&self, path: &str) -> Option<SyntaxRef> {
        path.rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| ext.len() > 0)
            .and_then(|ext| self.find(ext))
    }

    /// Returns an iterator over all descriptors in order of registration.
    pub fn syntaxes(&self) -> impl Iterator<Item = &SyntaxRef> {
        self.syntax_map.values()
    }

    fn read_file(path: &Path) -> Result<Syntax> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(&path.as_string(), e))?;
        toml::from_str::<ExternalSyntax>(&content)
            .map(Syntax::from)
            .map_err(|e| Error::syntax(&path.as_string(), &e))
    }
}

impl Default for Registry {
    fn default() -> Registry {
        let mut registry = Registry::new();
        registry.add(Syntax::c());
        registry
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::env;
    use std::process;

    const RUST_SYNTAX: &str = r#"
        name = "rust"
        extensions = ["rs"]
        keywords = ["fn", "let"]
        consts = ["true", "false"]
        comment = "//"
        strings = false
    "#;

    #[test]
    fn default_registry_has_c() {
        let registry = Registry::default();
        let syntax = registry.find("c").unwrap();
        assert_eq!(syntax.name, "c");
        assert!(registry.find("h").is_some());
        assert!(registry.find("cpp").is_some());
        assert!(registry.find("rs").is_none());
    }

    #[test]
    fn find_uses_last_extension() {
        let registry = Registry::default();
        assert!(registry.find_for_path("src/main.c").is_some());
        assert!(registry.find_for_path("./archive.tar.c").is_some());
        assert!(registry.find_for_path("main.c.bak").is_none());
        assert!(registry.find_for_path("Makefile").is_none());
        assert!(registry.find_for_path("trailing.").is_none());
    }

    #[test]
    fn add_replaces_existing_syntax() {
        let mut registry = Registry::default();
        let mut syntax = Syntax::c();
        syntax.extensions = vec!["cc".to_string()];
        registry.add(syntax);
        assert!(registry.find("c").is_none());
        assert!(registry.find("cc").is_some());
        assert_eq!(registry.syntaxes().count(), 1);
    }

    #[test]
    fn parse_external_syntax() {
        let ext = toml::from_str::<ExternalSyntax>(RUST_SYNTAX).unwrap();
        let syntax = Syntax::from(ext);
        assert_eq!(syntax.name, "rust");
        assert_eq!(syntax.keywords, vec!["fn", "let"]);
        assert!(syntax.types.is_empty());
        assert_eq!(syntax.comment.as_deref(), Some("//"));
        assert!(syntax.numbers);
        assert!(!syntax.strings);
    }

    #[test]
    fn reject_unknown_fields() {
        let text = format!("{RUST_SYNTAX}\ncolor = 3\n");
        assert!(toml::from_str::<ExternalSyntax>(&text).is_err());
    }

    #[test]
    fn load_syntax_dir() {
        let dir = env::temp_dir().join(format!("hed-syntax-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("rust.toml"), RUST_SYNTAX).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let registry = Registry::load_dir(&dir).unwrap();
        assert_eq!(registry.find("rs").unwrap().name, "rust");
        assert_eq!(registry.find("c").unwrap().name, "c");
        assert_eq!(registry.syntaxes().count(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_dir_fails() {
        let dir = env::temp_dir().join(format!("hed-missing-{}", process::id()));
        assert!(Registry::load_dir(&dir).is_err());
    }
}
