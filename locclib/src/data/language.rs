//! Language definitions and the per-run extension registry.
//!
//! [`Language`] is a closed enumeration. Each variant carries a stable
//! identifier (`name`), a unique display name used for sorting, optional
//! description and website, and the comment syntax the line visitor needs.
//!
//! [`LanguageRegistry`] maps file names and extensions to languages. It is an
//! ordinary value owned by the caller, so mappings added for one run never
//! leak into another.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::LoccError;

use super::visitor::Syntax;

/// A source or markup language known to the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Assembly,
    C,
    Clojure,
    CMake,
    Cpp,
    CSharp,
    Css,
    Dart,
    Dockerfile,
    Go,
    Groovy,
    Haskell,
    Html,
    Java,
    JavaScript,
    Json,
    Kotlin,
    Lua,
    Makefile,
    Markdown,
    ObjectiveC,
    Perl,
    Php,
    PlainText,
    Properties,
    Python,
    Ruby,
    Rust,
    Scala,
    Shell,
    Sql,
    Swift,
    Toml,
    TypeScript,
    Xml,
    Yaml,
}

/// Static metadata for one language.
#[derive(Debug)]
pub struct LanguageInfo {
    pub language: Language,
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: Option<&'static str>,
    pub website: Option<&'static str>,
    pub extensions: &'static [&'static str],
    pub file_names: &'static [&'static str],
    pub syntax: Syntax,
}

const C_STYLE: Syntax = Syntax {
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    doc_strings: &[],
};

const HASH: Syntax = Syntax {
    line_comments: &["#"],
    block_comments: &[],
    doc_strings: &[],
};

const MARKUP: Syntax = Syntax {
    line_comments: &[],
    block_comments: &[("<!--", "-->")],
    doc_strings: &[],
};

const PROSE: Syntax = Syntax {
    line_comments: &[],
    block_comments: &[],
    doc_strings: &[],
};

static LANGUAGES: [LanguageInfo; 36] = [
    LanguageInfo {
        language: Language::Assembly,
        name: "Assembly",
        display_name: "Assembly",
        description: Some("Assembly language"),
        website: None,
        extensions: &["asm", "s"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &[";"],
            block_comments: &[],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::C,
        name: "C",
        display_name: "C",
        description: Some("C programming language"),
        website: Some("https://www.iso.org/standard/74528.html"),
        extensions: &["c", "h"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Clojure,
        name: "Clojure",
        display_name: "Clojure",
        description: Some("Clojure functional programming language"),
        website: Some("https://clojure.org/"),
        extensions: &["clj", "cljs", "cljc", "edn"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &[";"],
            block_comments: &[],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::CMake,
        name: "CMake",
        display_name: "CMake",
        description: Some("CMake build script"),
        website: Some("https://cmake.org/"),
        extensions: &["cmake"],
        file_names: &["CMakeLists.txt"],
        syntax: HASH,
    },
    LanguageInfo {
        language: Language::Cpp,
        name: "Cpp",
        display_name: "C++",
        description: Some("C++ programming language"),
        website: Some("https://isocpp.org/"),
        extensions: &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::CSharp,
        name: "CSharp",
        display_name: "C#",
        description: Some("C# programming language"),
        website: Some("https://learn.microsoft.com/dotnet/csharp/"),
        extensions: &["cs"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Css,
        name: "Css",
        display_name: "CSS",
        description: Some("Cascading Style Sheets"),
        website: Some("https://www.w3.org/Style/CSS/"),
        extensions: &["css"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &[],
            block_comments: &[("/*", "*/")],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::Dart,
        name: "Dart",
        display_name: "Dart",
        description: Some("Dart programming language"),
        website: Some("https://dart.dev/"),
        extensions: &["dart"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Dockerfile,
        name: "Dockerfile",
        display_name: "Dockerfile",
        description: Some("Docker container build file"),
        website: Some("https://docs.docker.com/reference/dockerfile/"),
        extensions: &["dockerfile"],
        file_names: &["Dockerfile", "Containerfile"],
        syntax: HASH,
    },
    LanguageInfo {
        language: Language::Go,
        name: "Go",
        display_name: "Go",
        description: Some("Go programming language"),
        website: Some("https://go.dev/"),
        extensions: &["go"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Groovy,
        name: "Groovy",
        display_name: "Groovy",
        description: Some("Apache Groovy programming language"),
        website: Some("https://groovy-lang.org/"),
        extensions: &["groovy", "gradle"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Haskell,
        name: "Haskell",
        display_name: "Haskell",
        description: Some("Haskell functional programming language"),
        website: Some("https://www.haskell.org/"),
        extensions: &["hs", "lhs"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &["--"],
            block_comments: &[("{-", "-}")],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::Html,
        name: "Html",
        display_name: "HTML",
        description: Some("Hypertext Markup Language"),
        website: Some("https://html.spec.whatwg.org/"),
        extensions: &["html", "htm", "xhtml"],
        file_names: &[],
        syntax: MARKUP,
    },
    LanguageInfo {
        language: Language::Java,
        name: "Java",
        display_name: "Java",
        description: Some("Java programming language"),
        website: Some("https://www.java.com/"),
        extensions: &["java"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::JavaScript,
        name: "JavaScript",
        display_name: "JavaScript",
        description: Some("JavaScript programming language"),
        website: Some("https://developer.mozilla.org/docs/Web/JavaScript"),
        extensions: &["js", "mjs", "cjs", "jsx"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Json,
        name: "Json",
        display_name: "JSON",
        description: Some("JavaScript Object Notation"),
        website: Some("https://www.json.org/"),
        extensions: &["json"],
        file_names: &[],
        syntax: PROSE,
    },
    LanguageInfo {
        language: Language::Kotlin,
        name: "Kotlin",
        display_name: "Kotlin",
        description: Some("Kotlin programming language"),
        website: Some("https://kotlinlang.org/"),
        extensions: &["kt", "kts"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Lua,
        name: "Lua",
        display_name: "Lua",
        description: Some("Lua scripting language"),
        website: Some("https://www.lua.org/"),
        extensions: &["lua"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &["--"],
            block_comments: &[("--[[", "]]")],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::Makefile,
        name: "Makefile",
        display_name: "Makefile",
        description: Some("Make build file"),
        website: None,
        extensions: &["mk", "mak"],
        file_names: &["Makefile", "makefile", "GNUmakefile"],
        syntax: HASH,
    },
    LanguageInfo {
        language: Language::Markdown,
        name: "Markdown",
        display_name: "Markdown",
        description: Some("Markdown text markup"),
        website: Some("https://commonmark.org/"),
        extensions: &["md", "markdown"],
        file_names: &[],
        syntax: MARKUP,
    },
    LanguageInfo {
        language: Language::ObjectiveC,
        name: "ObjectiveC",
        display_name: "Objective-C",
        description: Some("Objective-C programming language"),
        website: None,
        extensions: &["m", "mm"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Perl,
        name: "Perl",
        display_name: "Perl",
        description: Some("Perl programming language"),
        website: Some("https://www.perl.org/"),
        extensions: &["pl", "pm"],
        file_names: &[],
        syntax: HASH,
    },
    LanguageInfo {
        language: Language::Php,
        name: "Php",
        display_name: "PHP",
        description: Some("PHP: Hypertext Preprocessor"),
        website: Some("https://www.php.net/"),
        extensions: &["php"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &["//", "#"],
            block_comments: &[("/*", "*/")],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::PlainText,
        name: "PlainText",
        display_name: "Plain Text",
        description: None,
        website: None,
        extensions: &["txt", "text"],
        file_names: &[],
        syntax: PROSE,
    },
    LanguageInfo {
        language: Language::Properties,
        name: "Properties",
        display_name: "Properties",
        description: Some("Java properties file"),
        website: None,
        extensions: &["properties"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &["#", "!"],
            block_comments: &[],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::Python,
        name: "Python",
        display_name: "Python",
        description: Some("Python programming language"),
        website: Some("https://www.python.org/"),
        extensions: &["py", "pyw", "pyi"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &["#"],
            block_comments: &[],
            doc_strings: &[("\"\"\"", "\"\"\""), ("'''", "'''")],
        },
    },
    LanguageInfo {
        language: Language::Ruby,
        name: "Ruby",
        display_name: "Ruby",
        description: Some("Ruby programming language"),
        website: Some("https://www.ruby-lang.org/"),
        extensions: &["rb", "rake", "gemspec"],
        file_names: &["Rakefile", "Gemfile"],
        syntax: Syntax {
            line_comments: &["#"],
            block_comments: &[("=begin", "=end")],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::Rust,
        name: "Rust",
        display_name: "Rust",
        description: Some("Rust programming language"),
        website: Some("https://www.rust-lang.org/"),
        extensions: &["rs"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Scala,
        name: "Scala",
        display_name: "Scala",
        description: Some("Scala programming language"),
        website: Some("https://www.scala-lang.org/"),
        extensions: &["scala", "sc", "sbt"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Shell,
        name: "Shell",
        display_name: "Shell",
        description: Some("Unix shell script"),
        website: None,
        extensions: &["sh", "bash", "zsh", "ksh"],
        file_names: &[],
        syntax: HASH,
    },
    LanguageInfo {
        language: Language::Sql,
        name: "Sql",
        display_name: "SQL",
        description: Some("Structured Query Language"),
        website: None,
        extensions: &["sql"],
        file_names: &[],
        syntax: Syntax {
            line_comments: &["--"],
            block_comments: &[("/*", "*/")],
            doc_strings: &[],
        },
    },
    LanguageInfo {
        language: Language::Swift,
        name: "Swift",
        display_name: "Swift",
        description: Some("Swift programming language"),
        website: Some("https://www.swift.org/"),
        extensions: &["swift"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Toml,
        name: "Toml",
        display_name: "TOML",
        description: Some("Tom's Obvious Minimal Language"),
        website: Some("https://toml.io/"),
        extensions: &["toml"],
        file_names: &[],
        syntax: HASH,
    },
    LanguageInfo {
        language: Language::TypeScript,
        name: "TypeScript",
        display_name: "TypeScript",
        description: Some("TypeScript programming language"),
        website: Some("https://www.typescriptlang.org/"),
        extensions: &["ts", "tsx", "mts", "cts"],
        file_names: &[],
        syntax: C_STYLE,
    },
    LanguageInfo {
        language: Language::Xml,
        name: "Xml",
        display_name: "XML",
        description: Some("Extensible Markup Language"),
        website: Some("https://www.w3.org/XML/"),
        extensions: &["xml", "xsd", "xsl", "xslt", "svg"],
        file_names: &[],
        syntax: MARKUP,
    },
    LanguageInfo {
        language: Language::Yaml,
        name: "Yaml",
        display_name: "YAML",
        description: Some("YAML Ain't Markup Language"),
        website: Some("https://yaml.org/"),
        extensions: &["yaml", "yml"],
        file_names: &[],
        syntax: HASH,
    },
];

impl Language {
    /// Every known language, in declaration order.
    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES.iter().map(|info| info.language)
    }

    /// Static metadata for this language.
    pub fn info(self) -> &'static LanguageInfo {
        &LANGUAGES[self as usize]
    }

    /// Stable identifier (e.g. `Cpp`), used as the `name` field in reports.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Human readable name (e.g. `C++`). Unique across all languages.
    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn description(self) -> Option<&'static str> {
        self.info().description
    }

    pub fn website(self) -> Option<&'static str> {
        self.info().website
    }

    pub fn syntax(self) -> &'static Syntax {
        &self.info().syntax
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = LoccError;

    /// Accepts either the identifier or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LANGUAGES
            .iter()
            .find(|info| {
                info.name.eq_ignore_ascii_case(wanted)
                    || info.display_name.eq_ignore_ascii_case(wanted)
            })
            .map(|info| info.language)
            .ok_or_else(|| LoccError::UnknownLanguage(s.to_string()))
    }
}

/// Maps file names and extensions to languages.
///
/// Exact file names (e.g. `Makefile`) are checked before extensions.
/// Extensions are stored lower-case without the leading period.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    extensions: HashMap<String, Language>,
    file_names: HashMap<String, Language>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for info in &LANGUAGES {
            for ext in info.extensions {
                registry.add_extension(ext, info.language);
            }
            for name in info.file_names {
                registry.add_file_name(name, info.language);
            }
        }
        registry
    }
}

impl LanguageRegistry {
    /// Create a registry preloaded with the default mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with no mappings at all.
    pub fn empty() -> Self {
        Self {
            extensions: HashMap::new(),
            file_names: HashMap::new(),
        }
    }

    /// Map an extension to a language, replacing any existing mapping.
    ///
    /// Returns the language previously mapped to the extension.
    pub fn add_extension(&mut self, extension: &str, language: Language) -> Option<Language> {
        self.extensions
            .insert(normalize_extension(extension), language)
    }

    /// Remove an extension mapping. Does nothing if the extension is unknown.
    pub fn remove_extension(&mut self, extension: &str) -> Option<Language> {
        self.extensions.remove(&normalize_extension(extension))
    }

    /// Map an exact file name (e.g. `Makefile`) to a language.
    pub fn add_file_name(&mut self, file_name: &str, language: Language) -> Option<Language> {
        self.file_names.insert(file_name.to_string(), language)
    }

    /// Detect the language of a file from its name.
    pub fn detect(&self, path: &Path) -> Option<Language> {
        let file_name = path.file_name()?.to_str()?;
        if let Some(language) = self.file_names.get(file_name) {
            return Some(*language);
        }
        let extension = path.extension()?.to_str()?;
        self.extensions.get(&extension.to_lowercase()).copied()
    }

    /// Extensions currently mapped to a language, sorted.
    pub fn extensions_for(&self, language: Language) -> Vec<&str> {
        let mut exts: Vec<&str> = self
            .extensions
            .iter()
            .filter(|(_, lang)| **lang == language)
            .map(|(ext, _)| ext.as_str())
            .collect();
        exts.sort_unstable();
        exts
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn test_table_matches_enum_order() {
        for (idx, info) in LANGUAGES.iter().enumerate() {
            assert_eq!(info.language as usize, idx, "{} is out of place", info.name);
        }
    }

    #[test]
    fn test_display_names_unique() {
        let mut seen = HashSet::new();
        for language in Language::all() {
            assert!(
                seen.insert(language.display_name()),
                "duplicate display name {}",
                language.display_name()
            );
        }
    }

    #[test]
    fn test_metadata() {
        assert_eq!(Language::Cpp.name(), "Cpp");
        assert_eq!(Language::Cpp.display_name(), "C++");
        assert_eq!(Language::Cpp.to_string(), "C++");
        assert_eq!(Language::Java.website(), Some("https://www.java.com/"));
        assert_eq!(Language::PlainText.description(), None);
        assert_eq!(Language::PlainText.website(), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Cpp".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("kotlin".parse::<Language>().unwrap(), Language::Kotlin);
        assert!(matches!(
            "Klingon".parse::<Language>(),
            Err(LoccError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_detect_by_extension() {
        let registry = LanguageRegistry::new();
        assert_eq!(
            registry.detect(&PathBuf::from("src/main.rs")),
            Some(Language::Rust)
        );
        assert_eq!(
            registry.detect(&PathBuf::from("/tmp/file1.CPP")),
            Some(Language::Cpp)
        );
        assert_eq!(registry.detect(&PathBuf::from("/tmp/file3.foo")), None);
        assert_eq!(registry.detect(&PathBuf::from("LICENSE")), None);
    }

    #[test]
    fn test_detect_file_name_before_extension() {
        let registry = LanguageRegistry::new();
        assert_eq!(
            registry.detect(&PathBuf::from("proj/CMakeLists.txt")),
            Some(Language::CMake)
        );
        assert_eq!(
            registry.detect(&PathBuf::from("proj/notes.txt")),
            Some(Language::PlainText)
        );
        assert_eq!(
            registry.detect(&PathBuf::from("Makefile")),
            Some(Language::Makefile)
        );
    }

    #[test]
    fn test_add_and_remove_extension() {
        let mut registry = LanguageRegistry::new();
        assert_eq!(registry.add_extension(".FOO", Language::Java), None);
        assert_eq!(
            registry.detect(&PathBuf::from("a.foo")),
            Some(Language::Java)
        );

        assert_eq!(registry.add_extension("h", Language::Cpp), Some(Language::C));
        assert_eq!(registry.detect(&PathBuf::from("a.h")), Some(Language::Cpp));

        assert_eq!(registry.remove_extension("Foo"), Some(Language::Java));
        assert_eq!(registry.detect(&PathBuf::from("a.foo")), None);
        assert_eq!(registry.remove_extension("foo"), None);
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = LanguageRegistry::new();
        first.remove_extension("rs");
        let second = LanguageRegistry::new();
        assert_eq!(first.detect(&PathBuf::from("lib.rs")), None);
        assert_eq!(
            second.detect(&PathBuf::from("lib.rs")),
            Some(Language::Rust)
        );
    }

    #[test]
    fn test_extensions_for() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.extensions_for(Language::Kotlin), vec!["kt", "kts"]);
        assert!(LanguageRegistry::empty()
            .extensions_for(Language::Kotlin)
            .is_empty());
    }
}
