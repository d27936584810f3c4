use std::io;

use bytes::BytesMut;

use super::{Exclude, HeaderField, HeaderMap, sort};
use crate::log::{debug, trace, warning};

const SEPARATOR: &[u8] = b": ";
const CRLF: &[u8] = b"\r\n";

impl HeaderMap {
    /// Write every header in wire format.
    ///
    /// Equivalent to [`write_subset`][HeaderMap::write_subset] with nothing excluded and no
    /// size hint.
    #[inline]
    pub fn write<W: io::Write>(&self, w: W) -> io::Result<()> {
        self.write_subset(w, &(), 0)
    }

    /// Write headers not in `exclude` in wire format.
    ///
    /// Each value is written as one `Name: value\r\n` line, name casing untouched. Values of a
    /// header keep their insertion order. Headers follow the [`HeaderOrder`] hint when one is
    /// set, and are sorted byte-wise otherwise. No blank line is written after the last header.
    ///
    /// With a non zero `size_hint`, at most `size_hint` bytes are staged before being handed to
    /// `w`, and `w` is flushed once the last staged bytes are written. Otherwise every part is
    /// written directly and `w` is not flushed. Use [`encoded_len`] to compute an exact
    /// hint.
    ///
    /// # Errors
    ///
    /// Returns the first error of `w` unchanged. Bytes already written are not rolled back.
    ///
    /// [`HeaderOrder`]: super::HeaderOrder
    /// [`encoded_len`]: HeaderMap::encoded_len
    pub fn write_subset<W, E>(&self, w: W, exclude: &E, size_hint: usize) -> io::Result<()>
    where
        W: io::Write,
        E: Exclude + ?Sized,
    {
        let mut staged = Staged {
            sink: w,
            buf: BytesMut::with_capacity(size_hint),
            limit: size_hint,
        };

        let result = self
            .resolve_order(exclude)
            .into_iter()
            .try_for_each(|field| write_field(&mut staged, field))
            .and_then(|()| staged.finish());

        if let Err(_err) = &result {
            warning!("failed to write headers: {_err}");
        }

        result
    }

    /// Write headers not in `exclude` in wire format into `dst`.
    ///
    /// Produces the same bytes as [`write_subset`][HeaderMap::write_subset].
    pub fn encode_subset<E: Exclude + ?Sized>(&self, dst: &mut BytesMut, exclude: &E) {
        dst.reserve(self.encoded_len(exclude));

        for field in self.resolve_order(exclude) {
            for value in field.values() {
                dst.extend_from_slice(field.name().as_bytes());
                dst.extend_from_slice(SEPARATOR);
                dst.extend_from_slice(value.as_bytes());
                dst.extend_from_slice(CRLF);
            }
        }
    }

    /// Returns the exact number of bytes written for the headers not in `exclude`.
    pub fn encoded_len<E: Exclude + ?Sized>(&self, exclude: &E) -> usize {
        self.fields()
            .filter(|field| !exclude.excludes(field.name()))
            .map(|field| {
                let line = field.name().len() + SEPARATOR.len() + CRLF.len();
                field.values().iter().map(|value| line + value.len()).sum::<usize>()
            })
            .sum()
    }

    /// Write headers not in `exclude` in wire format into an async writer.
    ///
    /// Headers are encoded in memory first, then written at once.
    ///
    /// # Errors
    ///
    /// Returns the first error of `w` unchanged.
    #[cfg(feature = "tokio")]
    pub async fn write_subset_async<W, E>(&self, w: &mut W, exclude: &E) -> io::Result<()>
    where
        W: tokio::io::AsyncWrite + Unpin,
        E: Exclude + ?Sized,
    {
        use tokio::io::AsyncWriteExt;

        let mut buf = BytesMut::new();
        self.encode_subset(&mut buf, exclude);
        w.write_all_buf(&mut buf).await
    }

    /// Resolve the emission order of the headers not in `exclude`.
    pub(crate) fn resolve_order<E: Exclude + ?Sized>(&self, exclude: &E) -> Vec<&HeaderField> {
        let mut fields: Vec<&HeaderField> = self
            .fields()
            .filter(|field| !exclude.excludes(field.name()))
            .collect();

        // byte-wise order is also the tie break for case variants and the order of leftovers
        sort::sort_by_name(&mut fields);

        match self.header_order() {
            Some(order) if !order.is_empty() => {
                trace!("ordering {} headers by {} order entries", fields.len(), order.len());
                apply_order(fields, order.as_slice())
            }
            _ => fields,
        }
    }
}

/// Reorder sorted `fields` by `order`.
///
/// Every order entry schedules all unscheduled fields whose name matches it ASCII
/// case-insensitively. Fields left unscheduled follow in their sorted order.
fn apply_order<'a>(fields: Vec<&'a HeaderField>, order: &[String]) -> Vec<&'a HeaderField> {
    let mut scheduled = vec![false; fields.len()];
    let mut ordered = Vec::with_capacity(fields.len());

    for entry in order {
        let mut found = false;
        for (field, done) in fields.iter().zip(scheduled.iter_mut()) {
            if !field.name().eq_ignore_ascii_case(entry) {
                continue;
            }
            found = true;
            if !*done {
                *done = true;
                ordered.push(*field);
            }
        }
        if !found {
            debug!("header order entry {entry:?} matched no header");
        }
    }

    if ordered.len() < fields.len() {
        debug!("{} headers not covered by header order", fields.len() - ordered.len());
        ordered.extend(
            fields
                .iter()
                .zip(&scheduled)
                .filter(|(_, done)| !**done)
                .map(|(field, _)| *field),
        );
    }

    ordered
}

fn write_field<W: io::Write>(staged: &mut Staged<W>, field: &HeaderField) -> io::Result<()> {
    for value in field.values() {
        staged.put(field.name().as_bytes())?;
        staged.put(SEPARATOR)?;
        staged.put(value.as_bytes())?;
        staged.put(CRLF)?;
    }
    Ok(())
}

/// Sink wrapper that stages at most `limit` bytes.
struct Staged<W> {
    sink: W,
    buf: BytesMut,
    limit: usize,
}

impl<W: io::Write> Staged<W> {
    fn put(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.buf.len() + bytes.len() > self.limit {
            self.drain()?;
        }
        if bytes.len() > self.limit {
            return self.sink.write_all(bytes);
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Write what is left, flushing the sink if anything was staged.
    fn finish(&mut self) -> io::Result<()> {
        self.drain()?;
        if self.limit > 0 {
            self.sink.flush()?;
        }
        Ok(())
    }

    fn drain(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.sink.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Write};

    use crate::headers::{HEADER_ORDER_KEY, HeaderMap};

    /// Accepts `budget` bytes then fails.
    struct Limited {
        written: Vec<u8>,
        budget: usize,
        writes: usize,
        flushes: usize,
    }

    impl Write for Limited {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.written.extend_from_slice(&buf[..n]);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn sample() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.set("Host", "example.com");
        map.set("Accept", "*/*");
        map
    }

    #[test]
    fn sink_error_is_propagated() {
        let mut sink = Limited { written: vec![], budget: 10, writes: 0, flushes: 0 };
        let err = sample().write(&mut sink).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // partial output stays written
        assert_eq!(sink.written, b"Accept: */");
    }

    #[test]
    fn size_hint_stages_output() {
        let map = sample();
        let len = map.encoded_len(&());

        let mut direct = Limited { written: vec![], budget: usize::MAX, writes: 0, flushes: 0 };
        map.write(&mut direct).unwrap();

        let mut staged = Limited { written: vec![], budget: usize::MAX, writes: 0, flushes: 0 };
        map.write_subset(&mut staged, &(), len).unwrap();

        assert_eq!(direct.written, staged.written);
        assert_eq!(staged.written.len(), len);
        assert_eq!(staged.writes, 1);
        assert!(direct.writes > 1);

        // staged output is flushed at the end, direct output is not
        assert_eq!(staged.flushes, 1);
        assert_eq!(direct.flushes, 0);
    }

    #[test]
    fn small_size_hint_never_exceeds_limit() {
        let mut map = HeaderMap::new();
        map.set("X-Long", "a".repeat(64));
        map.set("A", "1");

        let mut out = Vec::new();
        map.write_subset(&mut out, &(), 8).unwrap();
        assert_eq!(out, format!("A: 1\r\nX-Long: {}\r\n", "a".repeat(64)).as_bytes());
    }

    #[test]
    fn excluded_names_skip_custom_order() {
        let mut map = HeaderMap::new();
        map.set("Cookie", "a=1");
        map.set("Host", "example.com");
        map.set_values(HEADER_ORDER_KEY, ["cookie", "host"]);

        let mut out = Vec::new();
        map.write_subset(&mut out, &["Cookie"], 0).unwrap();
        assert_eq!(out, b"Host: example.com\r\n");
    }

    #[test]
    fn uncovered_names_follow_in_sorted_order() {
        let mut map = HeaderMap::new();
        map.set("b", "2");
        map.set("c", "3");
        map.set("a", "1");
        map.set("Z", "0");
        map.set_values(HEADER_ORDER_KEY, ["c", "missing"]);

        let mut out = Vec::new();
        map.write(&mut out).unwrap();
        assert_eq!(out, b"c: 3\r\nZ: 0\r\na: 1\r\nb: 2\r\n");
    }

    #[test]
    fn repeated_order_entries_do_not_duplicate() {
        let mut map = HeaderMap::new();
        map.set("Accept", "*/*");
        map.set("Host", "example.com");
        map.set_values(HEADER_ORDER_KEY, ["host", "HOST", "accept", "Host"]);

        let mut out = Vec::new();
        map.write(&mut out).unwrap();
        assert_eq!(out, b"Host: example.com\r\nAccept: */*\r\n");
    }

    #[test]
    fn case_variants_follow_one_entry() {
        let mut map = HeaderMap::new();
        map.set("accept", "2");
        map.set("Accept", "1");
        map.set("Host", "h");
        map.set_values(HEADER_ORDER_KEY, ["host", "ACCEPT"]);

        let mut out = Vec::new();
        map.write(&mut out).unwrap();
        assert_eq!(out, b"Host: h\r\nAccept: 1\r\naccept: 2\r\n");
    }

    #[test]
    fn empty_order_falls_back_to_sorting() {
        let mut map = HeaderMap::new();
        map.set("b", "2");
        map.set("a", "1");
        map.set_values(HEADER_ORDER_KEY, Vec::<String>::new());

        let mut out = Vec::new();
        map.write(&mut out).unwrap();
        assert_eq!(out, b"a: 1\r\nb: 2\r\n");
    }
}
