use forest_auth::Fault;
use forest_auth::Profile;
use forest_core::ID;

/// A follower subscribing to a followee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follow {
    followee: ID<Profile>,
    follower: ID<Profile>,
}

impl Follow {
    /// Self-follows are rejected before they reach storage.
    pub fn new(followee: ID<Profile>, follower: ID<Profile>) -> Result<Self, Fault> {
        match followee == follower {
            true => Err(Fault::bad("cantFollowSelf")),
            false => Ok(Self { followee, follower }),
        }
    }
    pub fn followee(&self) -> ID<Profile> {
        self.followee
    }
    pub fn follower(&self) -> ID<Profile> {
        self.follower
    }
}

mod schema {
    use super::*;
    use forest_pg::*;

    impl Schema for Follow {
        fn name() -> &'static str {
            FOLLOWS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                FOLLOWS,
                " (
                    followee_id UUID NOT NULL REFERENCES ",
                PROFILES,
                "(id) ON DELETE CASCADE,
                    follower_id UUID NOT NULL REFERENCES ",
                PROFILES,
                "(id) ON DELETE CASCADE,
                    PRIMARY KEY (followee_id, follower_id),
                    CHECK (followee_id <> follower_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_follow_relationships_follower ON ",
                FOLLOWS,
                " (follower_id);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn cannot_follow_self() {
        let me = ID::default();
        assert_eq!(Follow::new(me, me), Err(Fault::bad("cantFollowSelf")));
        assert!(Follow::new(ID::default(), me).is_ok());
    }
}
