use string_interner::{DefaultSymbol, StringInterner, Symbol};

index_vec::define_index_type! {
    /// Identifier of a word in a [`Vocabulary`].
    pub struct Wid = u32;
}

pub const NULL_WORD: &str = "{NULL}";

/// Bidirectional word table. The NULL word is always present with id 0.
#[derive(Clone)]
pub struct Vocabulary {
    interner: StringInterner,
}

impl Vocabulary {
    pub fn new() -> Self {
        let mut interner = StringInterner::default();
        interner.get_or_intern(NULL_WORD);
        Vocabulary { interner }
    }

    pub fn null_wid() -> Wid {
        Wid::new(0)
    }

    pub fn put(&mut self, word: &str) -> Wid {
        Wid::new(self.interner.get_or_intern(word).to_usize())
    }

    pub fn get(&self, word: &str) -> Option<Wid> {
        self.interner.get(word).map(|symbol| Wid::new(symbol.to_usize()))
    }

    pub fn word(&self, wid: Wid) -> Option<&str> {
        let symbol = DefaultSymbol::try_from_usize(wid.index())?;
        self.interner.resolve(symbol)
    }

    /// Number of words, NULL included.
    pub fn len(&self) -> usize {
        self.interner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    pub fn put_all<S: AsRef<str>>(&mut self, words: &[S]) -> Vec<Wid> {
        words.iter().map(|word| self.put(word.as_ref())).collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocabulary").field("len", &self.len()).finish()
    }
}
