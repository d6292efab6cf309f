use alloc::{string::String, vec};

use super::Lookahead;

fn filled(text: &str) -> Lookahead {
    let mut buffer = Lookahead::with_capacity(4);
    for ch in text.chars() {
        buffer.push(ch);
    }
    buffer
}

#[test]
fn copy_while_stops_on_rejected_rune() {
    let mut buffer = filled("abc,def");
    let mut dst = String::new();
    assert_eq!(buffer.copy_while(&mut dst, |c| c != ','), 3);
    assert_eq!(dst, "abc");
    assert_eq!(buffer.front(), Some(','));
    assert_eq!(buffer.len(), 4);
}

#[test]
fn copy_while_drains_when_everything_matches() {
    let mut buffer = filled("ååå");
    let mut dst = String::from(">");
    assert_eq!(buffer.copy_while(&mut dst, |_| true), 3);
    assert_eq!(dst, ">ååå");
    assert!(buffer.is_empty());
}

#[test]
fn copy_while_crosses_wrapped_slices() {
    // Pop from the front and push again so the ring wraps around.
    let mut buffer = filled("wxyz");
    assert_eq!(buffer.take(3), vec!['w', 'x', 'y']);
    for ch in "βγδ|".chars() {
        buffer.push(ch);
    }

    let mut dst = String::new();
    assert_eq!(buffer.copy_while(&mut dst, |c| c != '|'), 4);
    assert_eq!(dst, "zβγδ");
    assert_eq!(buffer.pop_front(), Some('|'));
    assert_eq!(buffer.pop_front(), None);
}

#[test]
fn as_slice_is_stable_after_wrap() {
    let mut buffer = filled("abcd");
    assert_eq!(buffer.discard(2), 2);
    buffer.push('e');
    buffer.push('f');
    assert_eq!(buffer.as_slice(), &['c', 'd', 'e', 'f']);
    // The view does not consume.
    assert_eq!(buffer.len(), 4);
}

#[test]
fn take_and_discard_are_clamped() {
    let mut buffer = filled("ab");
    assert_eq!(buffer.discard(5), 2);
    assert!(buffer.take(3).is_empty());
}

#[test]
fn copy_all_leaves_runes_buffered() {
    let buffer = filled("héllo");
    let mut dst = String::new();
    buffer.copy_all(&mut dst);
    assert_eq!(dst, "héllo");
    assert_eq!(buffer.len(), 5);
}
