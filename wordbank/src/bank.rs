use std::sync::Arc;

use asapcat_toolkit::Error;

/// Default size, in bytes, of a freshly allocated chunk in a [`WordBank::managed`]
/// bank. A single `store`/`append` call may still grow a chunk past this size
/// if the word itself is larger.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// A stable reference to a word's bytes inside a [`WordBank`].
///
/// `WordHandle` is a plain `(chunk, start, len)` triple: it carries no
/// lifetime and no pointer of its own, and is only meaningful together with
/// the [`WordBank`] that produced it — calling [`WordBank::resolve`] on a
/// foreign bank after `absorb` has shifted chunk indices is how two handles
/// from different banks compare by identity (pointer equality degrades to
/// "`chunk`/`start`/`len` equality within the same bank"); comparing the
/// underlying bytes is how callers compare words across banks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WordHandle {
    chunk: u32,
    start: u32,
    len: u32,
}

impl WordHandle {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remaps this handle onto a bank whose chunk list has been grown by
    /// `offset` chunks ahead of the bank this handle originally came from.
    /// Used by [`WordBank::absorb`] callers to keep handles valid after a merge.
    pub fn shifted(self, offset: u32) -> Self {
        Self {
            chunk: self.chunk + offset,
            ..self
        }
    }
}

#[derive(Debug)]
enum Chunk {
    Owned(Vec<u8>),
    Shared(Arc<[u8]>),
}

impl Chunk {
    fn bytes(&self) -> &[u8] {
        match self {
            Chunk::Owned(v) => v.as_slice(),
            Chunk::Shared(s) => s.as_ref(),
        }
    }

    fn as_owned_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self {
            Chunk::Owned(v) => Some(v),
            Chunk::Shared(_) => None,
        }
    }
}

/// The three flavours from the contract: `managed` owns growable chunks and
/// supports `append`/`erase_tail`; `pre_allocated` never copies bytes, it only
/// delimits words inside externally [`enregister`](WordBank::enregister)ed
/// chunks; `malloced` gives every word its own one-word allocation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Kind {
    Managed { chunk_size: usize },
    PreAllocated,
    Malloced,
}

/// An arena of immutable byte chunks handing out stable [`WordHandle`]s.
///
/// See `SPEC_FULL.md` §4 for the chosen handle representation and why
/// `absorb` is O(chunks) while per-handle remapping is left to the caller.
#[derive(Debug)]
pub struct WordBank {
    kind: Kind,
    chunks: Vec<Chunk>,
}

impl WordBank {
    pub fn managed() -> Self {
        Self::managed_with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    pub fn managed_with_chunk_size(chunk_size: usize) -> Self {
        Self {
            kind: Kind::Managed { chunk_size },
            chunks: Vec::new(),
        }
    }

    pub fn pre_allocated() -> Self {
        Self {
            kind: Kind::PreAllocated,
            chunks: Vec::new(),
        }
    }

    pub fn malloced() -> Self {
        Self {
            kind: Kind::Malloced,
            chunks: Vec::new(),
        }
    }

    pub fn chunk_count(&self) -> u32 {
        self.chunks.len() as u32
    }

    pub fn resolve(&self, handle: WordHandle) -> &[u8] {
        let chunk = &self.chunks[handle.chunk as usize];
        &chunk.bytes()[handle.start as usize..(handle.start + handle.len) as usize]
    }

    /// Copies `bytes` into the bank and returns a handle to them.
    pub fn store(&mut self, bytes: &[u8]) -> Result<WordHandle, Error> {
        match self.kind {
            Kind::Malloced => {
                let mut owned = Vec::new();
                owned
                    .try_reserve_exact(bytes.len())
                    .map_err(|e| Error::resource_exhausted(e.to_string()))?;
                owned.extend_from_slice(bytes);
                let chunk = self.chunks.len() as u32;
                self.chunks.push(Chunk::Owned(owned));
                Ok(WordHandle {
                    chunk,
                    start: 0,
                    len: bytes.len() as u32,
                })
            }
            Kind::PreAllocated => Err(Error::invariant(
                "store() is unsupported on a pre-allocated word bank; use enregister()+intern_at()",
            )),
            Kind::Managed { chunk_size } => self.store_managed(bytes, chunk_size),
        }
    }

    fn store_managed(&mut self, bytes: &[u8], chunk_size: usize) -> Result<WordHandle, Error> {
        if let Some(last) = self.chunks.last_mut().and_then(Chunk::as_owned_mut) {
            if last.len() + bytes.len() <= chunk_size || last.is_empty() {
                let start = last.len();
                last.try_reserve(bytes.len())
                    .map_err(|e| Error::resource_exhausted(e.to_string()))?;
                last.extend_from_slice(bytes);
                return Ok(WordHandle {
                    chunk: self.chunks.len() as u32 - 1,
                    start: start as u32,
                    len: bytes.len() as u32,
                });
            }
        }
        let mut fresh = Vec::new();
        fresh
            .try_reserve(bytes.len().max(chunk_size))
            .map_err(|e| Error::resource_exhausted(e.to_string()))?;
        fresh.extend_from_slice(bytes);
        let chunk = self.chunks.len() as u32;
        self.chunks.push(Chunk::Owned(fresh));
        Ok(WordHandle {
            chunk,
            start: 0,
            len: bytes.len() as u32,
        })
    }

    /// Extends `partial` with `bytes` if `partial` still points at the live
    /// tail of the bank; otherwise copies the existing prefix forward and
    /// stores the concatenation as a new word (matching `append`'s contract:
    /// "extends the most-recently-stored word if `partial_handle` points at
    /// the current arena tail; else behaves like `store` after copying the
    /// partial prefix forward").
    pub fn append(&mut self, partial: Option<WordHandle>, bytes: &[u8]) -> Result<WordHandle, Error> {
        let Kind::Managed { chunk_size } = self.kind else {
            return Err(Error::invariant("append() is only supported on a managed word bank"));
        };
        let Some(partial) = partial else {
            return self.store_managed(bytes, chunk_size);
        };
        if self.is_tail(partial) {
            let chunk = self.chunks[partial.chunk as usize]
                .as_owned_mut()
                .expect("managed chunk at tail must be owned");
            chunk
                .try_reserve(bytes.len())
                .map_err(|e| Error::resource_exhausted(e.to_string()))?;
            chunk.extend_from_slice(bytes);
            Ok(WordHandle {
                chunk: partial.chunk,
                start: partial.start,
                len: partial.len + bytes.len() as u32,
            })
        } else {
            let prefix = self.resolve(partial).to_vec();
            let mut combined = Vec::with_capacity(prefix.len() + bytes.len());
            combined.extend_from_slice(&prefix);
            combined.extend_from_slice(bytes);
            self.store_managed(&combined, chunk_size)
        }
    }

    /// True if `handle` refers to the bytes currently at the end of the
    /// bank's storage, i.e. nothing has been stored after it.
    fn is_tail(&self, handle: WordHandle) -> bool {
        match self.chunks.last() {
            Some(Chunk::Owned(v)) => {
                handle.chunk as usize == self.chunks.len() - 1
                    && handle.start as usize + handle.len as usize == v.len()
            }
            _ => false,
        }
    }

    /// Rewinds the arena tail back to the start of `handle`. Only valid if no
    /// later `store`/`append` happened since `handle` was produced.
    pub fn erase_tail(&mut self, handle: WordHandle) -> Result<(), Error> {
        if !self.is_tail(handle) {
            return Err(Error::invariant(
                "erase_tail() called with a handle that is not the current arena tail",
            ));
        }
        let chunk = self.chunks[handle.chunk as usize]
            .as_owned_mut()
            .expect("tail chunk must be owned");
        chunk.truncate(handle.start as usize);
        Ok(())
    }

    /// Adopts an externally-provided buffer (e.g. an entire mmapped input
    /// file) as a new shared chunk, returning its chunk index so callers can
    /// build handles into it with [`intern_at`](Self::intern_at).
    pub fn enregister(&mut self, buf: Arc<[u8]>) -> u32 {
        let chunk = self.chunks.len() as u32;
        self.chunks.push(Chunk::Shared(buf));
        chunk
    }

    /// Builds a handle into bytes already present in `chunk` (from
    /// [`enregister`](Self::enregister)) without copying — the "delimit in
    /// place" operation for a pre-allocated bank.
    pub fn intern_at(&self, chunk: u32, start: u32, len: u32) -> WordHandle {
        debug_assert!((chunk as usize) < self.chunks.len());
        WordHandle { chunk, start, len }
    }

    /// Transfers ownership of `other`'s chunks onto the end of `self`'s
    /// chunk list in O(chunks) and returns the offset that must be added to
    /// every [`WordHandle`] that was produced by `other` (see
    /// [`WordHandle::shifted`]). `other` is left empty.
    pub fn absorb(&mut self, mut other: WordBank) -> u32 {
        let offset = self.chunks.len() as u32;
        self.chunks.append(&mut other.chunks);
        offset
    }
}
