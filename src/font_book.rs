use std::{collections::HashMap, path::PathBuf, sync::Arc};

/// Font database plus a cache of lazily loaded faces.
///
/// `fontdb` tracks which fonts exist; the actual `fontdue` faces are parsed
/// on first use and kept as shared handles after that, so repeated queries
/// for the same face are cheap.
pub struct FontBook {
    /// This is the font set that has been registered with fontdb.
    database: fontdb::Database,
    /// Faces parsed by fontdue. Not every font in the database is loaded here.
    loaded: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Creates a new empty font book.
    pub fn new() -> Self {
        Self {
            database: fontdb::Database::new(),
            loaded: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.database.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.database.load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.database.load_fonts_dir(dir)
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.database.load_system_fonts();
    }

    /// Checks whether any face is registered.
    pub fn is_empty(&self) -> bool {
        self.database.is_empty()
    }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize {
        self.database.len()
    }

    /// Queries for a face matching the description.
    ///
    /// Returns the ID and the loaded face if found.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = self.database.query(query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Retrieves a face by ID, parsing it on first access.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.database.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let font: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(font))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }
}
