//! Read-only projections of a transcript for the comparison views.

use crate::models::{Message, Sender};

/// How the comparison view lays out a transcript.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    SideBySide,
    Sequential,
}

/// The Nth user message together with the Nth reply of each bot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonRow<'a> {
    pub user: &'a Message,
    pub bot_a: Option<&'a Message>,
    pub bot_b: Option<&'a Message>,
}

/// Pair messages by position within each sender's own subsequence.
///
/// A bot with fewer replies than there are user messages shows no reply for
/// the trailing rows instead of shifting its replies onto other rows.
pub fn side_by_side(messages: &[Message]) -> Vec<ComparisonRow<'_>> {
    let bot_a = by_sender(messages, Sender::BotA);
    let bot_b = by_sender(messages, Sender::BotB);

    by_sender(messages, Sender::User)
        .into_iter()
        .enumerate()
        .map(|(n, user)| ComparisonRow {
            user,
            bot_a: bot_a.get(n).copied(),
            bot_b: bot_b.get(n).copied(),
        })
        .collect()
}

fn by_sender(messages: &[Message], sender: Sender) -> Vec<&Message> {
    messages.iter().filter(|m| m.sender == sender).collect()
}

/// Messages in send order.
pub fn sequential(messages: &[Message]) -> impl Iterator<Item = &Message> {
    messages.iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BotSlot, Turn};

    fn turn(n: usize) -> Turn {
        Turn {
            user: Message::user(format!("question {n}")),
            bot_a: Message::reply(BotSlot::A, format!("a{n}"), "gpt-3.5-turbo"),
            bot_b: Message::reply(BotSlot::B, format!("b{n}"), "gpt-4"),
        }
    }

    #[test]
    fn nth_row_pairs_nth_user_message() {
        let messages: Vec<Message> = (0..3).flat_map(|n| turn(n).into_messages()).collect();

        let rows = side_by_side(&messages);

        assert_eq!(rows.len(), 3);
        for (n, row) in rows.iter().enumerate() {
            assert_eq!(row.user.text, format!("question {n}"));
            assert_eq!(row.bot_a.unwrap().text, format!("a{n}"));
            assert_eq!(row.bot_b.unwrap().text, format!("b{n}"));
        }
    }

    #[test]
    fn missing_replies_leave_empty_slots() {
        let mut messages: Vec<Message> = turn(0).into_messages().into();
        messages.push(Message::user("only a answered"));
        messages.push(Message::reply(BotSlot::A, "a1", "gpt-3.5-turbo"));
        messages.push(Message::user("nobody answered"));

        let rows = side_by_side(&messages);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].bot_a.unwrap().text, "a1");
        assert!(rows[1].bot_b.is_none());
        assert!(rows[2].bot_a.is_none());
        assert!(rows[2].bot_b.is_none());
    }

    #[test]
    fn rows_keep_their_user_id_as_turns_are_added() {
        let mut messages: Vec<Message> = (0..2).flat_map(|n| turn(n).into_messages()).collect();
        let before: Vec<_> = side_by_side(&messages).iter().map(|r| r.user.id).collect();

        messages.extend(turn(2).into_messages());
        let after: Vec<_> = side_by_side(&messages).iter().map(|r| r.user.id).collect();

        assert_eq!(after.len(), 3);
        assert_eq!(&after[..2], &before[..]);
        assert_ne!(after[2], after[0]);
    }

    #[test]
    fn sequential_keeps_send_order() {
        let messages: Vec<Message> = (0..2).flat_map(|n| turn(n).into_messages()).collect();
        let senders: Vec<_> = sequential(&messages).map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::User,
                Sender::BotA,
                Sender::BotB,
                Sender::User,
                Sender::BotA,
                Sender::BotB
            ]
        );
    }
}
