#![no_main]
use std::io::{self, BufRead, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runebuf::{BytesSource, Error, IoSource, Outcome, RuneReader, RuneSource};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Class {
    Alphabetic,
    Whitespace,
    Ascii,
}

impl Class {
    fn accepts(self, ch: char) -> bool {
        match self {
            Class::Alphabetic => ch.is_alphabetic(),
            Class::Whitespace => ch.is_whitespace(),
            Class::Ascii => ch.is_ascii(),
        }
    }
}

#[derive(Arbitrary, Debug)]
enum Op {
    Peek(u8),
    PeekOne,
    Read(u8),
    ReadOne,
    Skip(u8),
    ReadWhile(Class),
    SkipWhile(Class),
    AtEnd,
}

#[derive(Arbitrary, Debug)]
struct Input {
    /// Fill sizes handed out by the streamed reader, cycled.
    fills: Vec<u8>,
    ops: Vec<Op>,
    bytes: Vec<u8>,
}

/// Hands out `bytes` in fills sized by `fills`, splitting runes anywhere.
struct Fills<'a> {
    bytes: &'a [u8],
    fills: &'a [u8],
    fill: usize,
    end: usize,
}

impl Read for Fills<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for Fills<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.end == 0 && !self.bytes.is_empty() {
            let size = self
                .fills
                .get(self.fill % self.fills.len().max(1))
                .map_or(self.bytes.len(), |&f| usize::from(f).max(1));
            self.fill += 1;
            self.end = size.min(self.bytes.len());
        }
        Ok(&self.bytes[..self.end])
    }

    fn consume(&mut self, amt: usize) {
        self.bytes = &self.bytes[amt..];
        self.end -= amt;
    }
}

/// What an outcome's stop looks like, comparable across sources.
fn stop<T>(outcome: &Outcome<T>) -> Option<Option<usize>> {
    outcome.error().map(|err| match err {
        Error::Decode { offset, .. } => Some(*offset),
        _ => None,
    })
}

fn run<S: RuneSource>(reader: &mut RuneReader<S>, op: &Op) -> String {
    match *op {
        Op::Peek(n) => {
            let n = usize::from(n);
            let first = reader.peek(n);
            let (runes, first_stop) = (first.value().to_vec(), stop(&first));
            let again = reader.peek(n);
            assert_eq!(again.value(), &runes.as_slice(), "peek is not repeatable");
            assert_eq!(stop(&again), first_stop);
            format!("{runes:?} {first_stop:?}")
        }
        Op::PeekOne => {
            let outcome = reader.peek_one();
            format!("{:?} {:?}", outcome.value(), stop(&outcome))
        }
        Op::Read(n) => {
            let peek = reader.peek(usize::from(n));
            let (peeked, peek_stop) = (peek.value().to_vec(), stop(&peek));
            let outcome = reader.read(usize::from(n));
            assert_eq!(outcome.value(), &peeked, "read differs from peek");
            assert_eq!(stop(&outcome), peek_stop);
            format!("{:?} {:?}", outcome.value(), stop(&outcome))
        }
        Op::ReadOne => {
            let outcome = reader.read_one();
            format!("{:?} {:?}", outcome.value(), stop(&outcome))
        }
        Op::Skip(n) => {
            let outcome = reader.skip(usize::from(n));
            format!("{:?} {:?}", outcome.value(), stop(&outcome))
        }
        Op::ReadWhile(class) => {
            let run = reader.read_while(|c| class.accepts(c));
            let next = reader.peek_one();
            if next.is_complete() {
                assert!(!class.accepts(*next.value()), "read_while consumed too little");
            }
            run
        }
        Op::SkipWhile(class) => reader.skip_while(|c| class.accepts(c)).to_string(),
        Op::AtEnd => {
            let at_end = reader.at_end();
            assert_eq!(at_end, reader.peek_one().is_exhausted());
            at_end.to_string()
        }
    }
}

fuzz_target!(|input: Input| {
    let mut in_memory = RuneReader::new(BytesSource::new(&input.bytes));
    let mut streamed = RuneReader::new(IoSource::new(Fills {
        bytes: &input.bytes,
        fills: &input.fills,
        fill: 0,
        end: 0,
    }));

    for op in &input.ops {
        let expected = run(&mut in_memory, op);
        let actual = run(&mut streamed, op);
        assert_eq!(expected, actual, "{op:?} diverged between sources");
    }

    assert_eq!(in_memory.remainder().ok(), streamed.remainder().ok());
});
