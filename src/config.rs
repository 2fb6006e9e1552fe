//! Contains everything related to configuration.
//!
//! All default values for configurable aspects of the editor are defined in this
//! module, including *settings*, *theme colors*, and *key bindings*.
//!
//! At a minimum, [`Configuration::default()`] is sufficient for initializing the
//! editor. However, the normal process is to apply multiple tiers of configuration,
//! all optional, resulting in a final blended configuration.
//!
//! External configuration files are expected to be formatted according to the
//! [TOML specification](https://toml.io), such as the following:
//!
//! ```toml
//! [settings]
//! quit-presses = 3
//! debug = true
//!
//! [theme]
//! keyword = 34
//! select-bg = 19
//!
//! [bindings.normal]
//! "x" = "delete-right"
//! "ctrl-x:s" = "save-file"
//! ```
//!
//! The default method of loading an external configuration file via
//! [`Configuration::load()`] will try to locate files in the following locations in
//! order of precedence:
//!
//! * `$HOME/.hedrc`
//! * `$HOME/.hed/hedrc`
//! * `$HOME/.config/hed/hedrc`

use crate::bind::Bindings;
use crate::color::{self, Color};
use crate::error::{Error, Result};
use crate::highlight::Highlight;
use crate::mode::Mode;
use crate::opt::Options;
use crate::syntax::Registry;
use crate::sys::{self, AsString};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

/// A configuration representing all aspects of the editing experience.
pub struct Configuration {
    /// A collection of configurable settings that control the behavior and rendering
    /// of the editor.
    pub settings: Settings,

    /// A collection of configurable colors.
    pub theme: Theme,

    /// A map of key sequences to editing operations for each mode.
    pub bindings: Bindings,

    /// A registry of syntax descriptors.
    pub registry: Registry,
}

pub type ConfigurationRef = Rc<Configuration>;

pub struct Settings {
    /// Number of additional presses of the quit key required to leave while the
    /// document has unsaved changes.
    pub quit_presses: u32,

    /// Number of rows and columns kept between the cursor and the bottom and right
    /// edges of the display.
    pub scroll_margin: usize,

    pub debug: bool,
    pub global_clipboard: bool,
    pub welcome: bool,
}

pub struct Theme {
    pub number_fg: u8,
    pub string_fg: u8,
    pub comment_fg: u8,
    pub keyword_fg: u8,
    pub type_fg: u8,
    pub const_fg: u8,
    pub select_bg: u8,
    pub status_fg: u8,
    pub status_bg: u8,
    pub status_insert_bg: u8,
    pub error_fg: u8,
    pub error_bg: u8,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalConfiguration {
    settings: Option<ExternalSettings>,
    theme: Option<ExternalTheme>,
    bindings: Option<IndexMap<String, IndexMap<String, String>>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalSettings {
    #[serde(rename = "quit-presses")]
    quit_presses: Option<u32>,

    #[serde(rename = "scroll-margin")]
    scroll_margin: Option<usize>,

    debug: Option<bool>,

    #[serde(rename = "global-clipboard")]
    global_clipboard: Option<bool>,

    welcome: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ExternalTheme {
    number: Option<u8>,
    string: Option<u8>,
    comment: Option<u8>,
    keyword: Option<u8>,
    #[serde(rename = "type")]
    type_: Option<u8>,
    #[serde(rename = "const")]
    const_: Option<u8>,
    select_bg: Option<u8>,
    status_fg: Option<u8>,
    status_bg: Option<u8>,
    status_insert_bg: Option<u8>,
    error_fg: Option<u8>,
    error_bg: Option<u8>,
}

impl Settings {
    /// Applies the external settings `ext` on top of `self`.
    fn apply(&mut self, ext: Option<ExternalSettings>) {
        if let Some(ext) = ext {
            self.quit_presses = ext.quit_presses.unwrap_or(self.quit_presses);
            self.scroll_margin = ext.scroll_margin.unwrap_or(self.scroll_margin);
            self.debug = ext.debug.unwrap_or(self.debug);
            self.global_clipboard = ext.global_clipboard.unwrap_or(self.global_clipboard);
            self.welcome = ext.welcome.unwrap_or(self.welcome);
        }
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) {
        self.debug = opts.debug.unwrap_or(self.debug);
        self.scroll_margin = opts.scroll_margin.unwrap_or(self.scroll_margin);
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            quit_presses: 2,
            scroll_margin: 5,
            debug: false,
            global_clipboard: false,
            welcome: true,
        }
    }
}

impl Theme {
    /// Applies the external theme `ext` on top of `self`.
    fn apply(&mut self, ext: Option<ExternalTheme>) {
        if let Some(ext) = ext {
            self.number_fg = ext.number.unwrap_or(self.number_fg);
            self.string_fg = ext.string.unwrap_or(self.string_fg);
            self.comment_fg = ext.comment.unwrap_or(self.comment_fg);
            self.keyword_fg = ext.keyword.unwrap_or(self.keyword_fg);
            self.type_fg = ext.type_.unwrap_or(self.type_fg);
            self.const_fg = ext.const_.unwrap_or(self.const_fg);
            self.select_bg = ext.select_bg.unwrap_or(self.select_bg);
            self.status_fg = ext.status_fg.unwrap_or(self.status_fg);
            self.status_bg = ext.status_bg.unwrap_or(self.status_bg);
            self.status_insert_bg = ext.status_insert_bg.unwrap_or(self.status_insert_bg);
            self.error_fg = ext.error_fg.unwrap_or(self.error_fg);
            self.error_bg = ext.error_bg.unwrap_or(self.error_bg);
        }
    }

    /// Returns the foreground color of text tagged with `tag`, or `None` if the
    /// text is drawn with the default color of the terminal.
    pub fn fg_of(&self, tag: Highlight) -> Option<u8> {
        match tag {
            Highlight::Normal => None,
            Highlight::Number => Some(self.number_fg),
            Highlight::String => Some(self.string_fg),
            Highlight::Comment => Some(self.comment_fg),
            Highlight::Keyword => Some(self.keyword_fg),
            Highlight::Type => Some(self.type_fg),
            Highlight::Const => Some(self.const_fg),
        }
    }

    /// Returns the color of the status line in `mode`.
    pub fn status_color(&self, mode: Mode) -> Color {
        let bg = if mode == Mode::Insert {
            self.status_insert_bg
        } else {
            self.status_bg
        };
        Color::new(self.status_fg, bg)
    }

    pub fn error_color(&self) -> Color {
        Color::new(self.error_fg, self.error_bg)
    }
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            number_fg: color::RED,
            string_fg: color::MAGENTA,
            comment_fg: color::MAGENTA,
            keyword_fg: color::GREEN,
            type_fg: color::YELLOW,
            const_fg: color::MAGENTA,
            select_bg: color::BLUE,
            status_fg: color::BLACK,
            status_bg: color::BLUE,
            status_insert_bg: color::WHITE,
            error_fg: color::WHITE,
            error_bg: color::RED,
        }
    }
}

impl Configuration {
    /// A collection of resource files to try loading in order of precedence.
    const TRY_FILES: [&str; 3] = [".hedrc", ".hed/hedrc", ".config/hed/hedrc"];

    /// Returns a configuration that is formed by attempting to load a resource file
    /// from well-known locations.
    pub fn load() -> Result<Configuration> {
        let mut config = Configuration::default();
        let root_path = sys::home_dir();
        for try_path in Self::TRY_FILES {
            let path = root_path.join(try_path);
            if path.exists() {
                let ext = Self::read_file(&path)?;
                config.apply(ext)?;
                debug!(path = %path.as_string(), "configuration loaded");
                break;
            }
        }
        Ok(config)
    }

    /// Returns a configuration loaded from the resource file at `path`.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let mut config = Configuration::default();
        let ext = Self::read_file(path.as_ref())?;
        config.apply(ext)?;
        Ok(config)
    }

    /// Turns the configuration into a [`ConfigurationRef`].
    pub fn to_ref(self) -> ConfigurationRef {
        Rc::new(self)
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) {
        self.settings.apply_opts(opts);
    }

    /// Applies the external configuration `ext` on top of `self`.
    fn apply(&mut self, ext: ExternalConfiguration) -> Result<()> {
        self.settings.apply(ext.settings);
        self.theme.apply(ext.theme);
        if let Some(bindings) = ext.bindings {
            for (mode, table) in bindings {
                let mode = Mode::from_name(&mode).ok_or_else(|| Error::invalid_mode(&mode))?;
                for (key_seq, op) in table {
                    self.bindings.bind(mode, &key_seq, &op)?;
                }
            }
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<ExternalConfiguration> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(&path.as_string(), e))?;
        Self::parse(&content).map_err(|e| Error::configuration(&path.as_string(), &e))
    }

    fn parse(content: &str) -> std::result::Result<ExternalConfiguration, toml::de::Error> {
        toml::from_str::<ExternalConfiguration>(content)
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            settings: Settings::default(),
            theme: Theme::default(),
            bindings: Bindings::new(),
            registry: Registry::default(),
        }
    }
}
