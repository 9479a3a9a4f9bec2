//! Level lifecycle driving delayed-action replay.
//!
//! A [`Session`] owns the delayed-action context, the persisted log and every
//! level the player has generated. Exactly one level is active at a time;
//! the rest are dormant and only catch up on the log when they are entered.

use std::collections::BTreeMap;

use level_actions::{
    CountedAction, DelayedAction, DelayedActions, Level, LevelHooks, LevelId,
};

use crate::config::SessionConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::ActionLogRepository;

#[derive(Debug)]
pub struct Session<R, H> {
    config: SessionConfig,
    actions: DelayedActions,
    repository: R,
    hooks: H,
    active: Level,
    dormant: BTreeMap<LevelId, Level>,
}

impl<R, H> Session<R, H>
where
    R: ActionLogRepository,
    H: LevelHooks,
{
    /// Starts a session on `first_level`.
    ///
    /// Anything already in `repository` is treated as history and replayed
    /// onto `first_level` according to its cursor.
    pub fn new(config: SessionConfig, repository: R, hooks: H, first_level: Level) -> Result<Self> {
        let id = first_level.id;
        Self::resume(config, repository, hooks, [first_level], id)
    }

    /// Rebuilds a session from a persisted log and saved levels.
    ///
    /// Every saved level is counted so queries cover explored levels without
    /// entering them. The active level is then caught up and recounted;
    /// dormant levels keep their cursors until entered.
    pub fn resume(
        config: SessionConfig,
        mut repository: R,
        hooks: H,
        levels: impl IntoIterator<Item = Level>,
        active: LevelId,
    ) -> Result<Self> {
        let log = repository.load_all()?;
        let mut actions = DelayedActions::from_log(config.game_config.clone(), log);

        let mut dormant = BTreeMap::new();
        for level in levels {
            check_cursor(&actions, &level)?;
            actions.recount(&level);
            let id = level.id;
            if dormant.insert(id, level).is_some() {
                return Err(RuntimeError::DuplicateLevel(id));
            }
        }
        let active_level = dormant
            .remove(&active)
            .ok_or(RuntimeError::UnknownLevel(active))?;

        tracing::debug!(
            active = %active,
            levels = dormant.len() + 1,
            log_len = actions.log().len(),
            "resuming session"
        );

        let mut session = Self {
            config,
            actions,
            repository,
            hooks,
            active: active_level,
            dormant,
        };
        session.refresh_active();
        Ok(session)
    }

    /// Registers a dormant level.
    ///
    /// A freshly generated level carries cursor 0 and so will replay the
    /// whole log on first entry, exactly like a level that existed before
    /// any action was scheduled.
    pub fn add_level(&mut self, level: Level) -> Result<()> {
        let id = level.id;
        if self.contains(id) {
            return Err(RuntimeError::DuplicateLevel(id));
        }
        check_cursor(&self.actions, &level)?;

        tracing::debug!(level = %id, cursor = level.actions_done(), "added level");
        self.dormant.insert(id, level);
        Ok(())
    }

    /// Makes `id` the active level.
    ///
    /// The level being left is counted before it goes dormant. The entered
    /// level catches up on the log and is counted afterwards. Returns the
    /// number of delayed actions replayed.
    pub fn enter_level(&mut self, id: LevelId) -> Result<usize> {
        if id != self.active.id {
            let next = self
                .dormant
                .remove(&id)
                .ok_or(RuntimeError::UnknownLevel(id))?;

            self.actions.update_counters(&self.active);
            let previous = std::mem::replace(&mut self.active, next);
            tracing::debug!(from = %previous.id, to = %id, "changing level");
            self.dormant.insert(previous.id, previous);
        }

        Ok(self.refresh_active())
    }

    /// Records `act` in the repository, applies it to the active level, then
    /// flushes.
    ///
    /// Nothing is mutated if the append is rejected. Once appended, the entry
    /// is part of the log and is applied even if the flush fails; the flush
    /// error is still returned.
    pub fn schedule(&mut self, act: impl Into<DelayedAction>) -> Result<()> {
        let act = act.into();
        self.repository.append(act)?;
        self.actions
            .schedule(act, &mut self.active, &mut self.hooks);
        self.repository.flush()?;
        Ok(())
    }

    /// Recounts the active level.
    ///
    /// Call after the active level's population changed outside of delayed
    /// actions, e.g. when a new ally joins.
    pub fn update_counters(&mut self) {
        self.actions.update_counters(&self.active);
    }

    pub fn query_counter(&self, act: CountedAction) -> u32 {
        self.actions.query_counter(act)
    }

    pub fn active_level(&self) -> &Level {
        &self.active
    }

    pub fn active_level_mut(&mut self) -> &mut Level {
        &mut self.active
    }

    /// Looks up a level whether active or dormant.
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        if id == self.active.id {
            Some(&self.active)
        } else {
            self.dormant.get(&id)
        }
    }

    pub fn contains(&self, id: LevelId) -> bool {
        self.level(id).is_some()
    }

    /// Iterates over every level, active first.
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        std::iter::once(&self.active).chain(self.dormant.values())
    }

    pub fn actions(&self) -> &DelayedActions {
        &self.actions
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Flushes the repository and hands back the saved parts.
    pub fn close(mut self) -> Result<(R, Vec<Level>)> {
        self.repository.flush()?;
        let mut levels = Vec::with_capacity(self.dormant.len() + 1);
        levels.push(self.active);
        levels.extend(self.dormant.into_values());
        Ok((self.repository, levels))
    }

    fn refresh_active(&mut self) -> usize {
        let applied = self.actions.catchup(&mut self.active, &mut self.hooks);
        self.actions.update_counters(&self.active);
        applied
    }
}

fn check_cursor(actions: &DelayedActions, level: &Level) -> Result<()> {
    let len = actions.log().len();
    if level.actions_done() > len {
        return Err(RuntimeError::CursorAhead {
            level: level.id,
            done: level.actions_done(),
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryActionLog;
    use level_actions::state::{Branch, Feature, TerrainGrid};
    use level_actions::{NoHooks, UncountedAction};

    fn level(depth: u8) -> Level {
        Level::new(
            LevelId::new(Branch::Dungeon, depth),
            TerrainGrid::new(6, 6, Feature::Floor),
        )
    }

    fn session() -> Session<InMemoryActionLog, NoHooks> {
        Session::new(
            SessionConfig::default(),
            InMemoryActionLog::new(),
            NoHooks,
            level(1),
        )
        .unwrap()
    }

    #[test]
    fn add_level_rejects_duplicates() {
        let mut session = session();
        session.add_level(level(2)).unwrap();

        for depth in [1, 2] {
            let err = session.add_level(level(depth)).unwrap_err();
            assert!(matches!(err, RuntimeError::DuplicateLevel(_)));
        }
    }

    #[test]
    fn add_level_rejects_cursor_past_log() {
        let mut session = session();
        let err = session
            .add_level(level(2).with_actions_done(1))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::CursorAhead { done: 1, len: 0, .. }));
    }

    #[test]
    fn enter_unknown_level_fails_without_switching() {
        let mut session = session();
        let err = session
            .enter_level(LevelId::new(Branch::Crypt, 1))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownLevel(_)));
        assert_eq!(session.active_level().id, level(1).id);
    }

    #[test]
    fn schedule_persists_before_applying() {
        let mut session = session();
        session.schedule(UncountedAction::RotCorpses).unwrap();

        assert_eq!(
            session.repository().entries(),
            &[DelayedAction::from(UncountedAction::RotCorpses)]
        );
        assert_eq!(session.active_level().actions_done(), 1);
    }

    /// Accepts appends but fails every flush.
    #[derive(Debug, Default)]
    struct UnflushableLog {
        inner: InMemoryActionLog,
    }

    impl ActionLogRepository for UnflushableLog {
        fn append(&mut self, act: DelayedAction) -> crate::repository::Result<u64> {
            self.inner.append(act)
        }

        fn load_all(&mut self) -> crate::repository::Result<level_actions::ActionLog> {
            self.inner.load_all()
        }

        fn flush(&mut self) -> crate::repository::Result<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    #[test]
    fn failed_flush_keeps_log_and_repository_in_step() {
        let mut session = Session::new(
            SessionConfig::default(),
            UnflushableLog::default(),
            NoHooks,
            level(1),
        )
        .unwrap();

        let err = session.schedule(UncountedAction::Reautomap).unwrap_err();
        assert!(matches!(err, RuntimeError::Repository(_)));

        assert_eq!(session.repository().len(), 1);
        assert_eq!(session.actions().log().len(), 1);
        assert_eq!(session.active_level().actions_done(), 1);
    }

    #[test]
    fn resume_requires_active_level() {
        let err = Session::resume(
            SessionConfig::default(),
            InMemoryActionLog::new(),
            NoHooks,
            [level(1)],
            level(2).id,
        )
        .err()
        .unwrap();
        assert!(matches!(err, RuntimeError::UnknownLevel(_)));
    }
}
