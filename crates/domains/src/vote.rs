//! # Vote State Machine
//!
//! Each (user, photo) pair has a derived three-valued vote state. Four
//! actions move between states; every other (state, action) pair is
//! rejected before anything mutates. A counter is never touched without
//! its membership set, so `likes == |likes_by|` and
//! `dislikes == |dislikes_by|` hold after every successful transition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Photo;

/// The four recognized vote actions, in wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteAction {
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "removeLike")]
    RemoveLike,
    #[serde(rename = "dislike")]
    Dislike,
    #[serde(rename = "removeDislike")]
    RemoveDislike,
}

impl FromStr for VoteAction {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "removeLike" => Ok(Self::RemoveLike),
            "dislike" => Ok(Self::Dislike),
            "removeDislike" => Ok(Self::RemoveDislike),
            other => Err(VoteError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Like => "like",
            Self::RemoveLike => "removeLike",
            Self::Dislike => "dislike",
            Self::RemoveDislike => "removeDislike",
        };
        f.write_str(s)
    }
}

/// Derived relationship between a user and a photo. Never persisted;
/// computed from set membership on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    None,
    Liked,
    Disliked,
}

/// Rejected vote transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// Action would re-apply the vote the user already holds
    #[error("vote already recorded for this user")]
    DuplicateVote,

    /// Action contradicts the opposite standing vote; the caller must
    /// remove the existing vote first (no one-call like→dislike switch)
    #[error("user holds the opposite vote on this photo")]
    ConflictingVote,

    /// Removal requested but no standing vote exists
    #[error("no vote recorded for this user")]
    NoSuchVote,

    /// Action string outside the recognized vocabulary
    #[error("unrecognized vote action: {0}")]
    InvalidAction(String),
}

impl Photo {
    /// Derives the vote state of `user` from set membership.
    pub fn vote_state_of(&self, user: Uuid) -> VoteState {
        if self.likes_by.contains(&user) {
            VoteState::Liked
        } else if self.dislikes_by.contains(&user) {
            VoteState::Disliked
        } else {
            VoteState::None
        }
    }

    /// Applies one vote transition, or rejects it leaving the photo
    /// untouched.
    ///
    /// Transition table:
    ///
    /// | state    | action        | result   |
    /// |----------|---------------|----------|
    /// | none     | like          | liked    |
    /// | liked    | removeLike    | none     |
    /// | none     | dislike       | disliked |
    /// | disliked | removeDislike | none     |
    ///
    /// Everything else fails: re-voting is `DuplicateVote`, voting against
    /// a standing opposite vote is `ConflictingVote`, removing a vote that
    /// does not exist is `NoSuchVote`.
    pub fn apply_vote(&mut self, user: Uuid, action: VoteAction) -> Result<(), VoteError> {
        use VoteAction::*;
        use VoteState::*;

        match (self.vote_state_of(user), action) {
            (None, Like) => {
                self.likes_by.push(user);
                self.likes += 1;
                Ok(())
            }
            (Liked, RemoveLike) => {
                self.likes_by.retain(|u| *u != user);
                self.likes -= 1;
                Ok(())
            }
            (None, Dislike) => {
                self.dislikes_by.push(user);
                self.dislikes += 1;
                Ok(())
            }
            (Disliked, RemoveDislike) => {
                self.dislikes_by.retain(|u| *u != user);
                self.dislikes -= 1;
                Ok(())
            }
            (Liked, Like) | (Disliked, Dislike) => Err(VoteError::DuplicateVote),
            (Liked, Dislike) | (Disliked, Like) => Err(VoteError::ConflictingVote),
            (None, RemoveLike)
            | (None, RemoveDislike)
            | (Liked, RemoveDislike)
            | (Disliked, RemoveLike) => Err(VoteError::NoSuchVote),
        }
    }
}
