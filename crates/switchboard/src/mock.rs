//! In-memory session used by the unit tests

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
};

use crate::{
    feature::{Handler, Kind},
    session::{CommandSpec, Event, EventKey, Session},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd(pub &'static str);

impl CommandSpec for Cmd {
    fn name(&self) -> &str { self.0 }
}

#[derive(Debug, Clone)]
pub struct Ev {
    kind: Option<Kind>,
    id: String,
}

impl Ev {
    pub fn new(kind: Kind, id: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            id: id.into(),
        }
    }

    pub fn ping() -> Self {
        Self {
            kind: None,
            id: String::new(),
        }
    }
}

impl Event for Ev {
    fn key(&self) -> Option<EventKey<'_>> { self.kind.map(|k| EventKey::new(k, &self.id)) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Overwrite(Option<u64>, Vec<&'static str>),
    Delete(Option<u64>, u64),
}

#[derive(Debug, thiserror::Error)]
#[error("remote failure")]
pub struct Remote;

#[derive(Debug)]
struct State {
    calls: Vec<Call>,
    next_id: u64,
    fail_overwrite: bool,
    fail_delete: BTreeSet<u64>,
    remote: BTreeMap<Option<u64>, Vec<u64>>,
}

#[derive(Debug, Clone)]
pub struct Mock {
    app: u64,
    state: Arc<Mutex<State>>,
}

impl Mock {
    pub fn new(app: u64) -> Self {
        Self {
            app,
            state: Arc::new(Mutex::new(State {
                calls: vec![],
                next_id: 101,
                fail_overwrite: false,
                fail_delete: BTreeSet::new(),
                remote: BTreeMap::new(),
            })),
        }
    }

    /// A second connection sharing this one's remote state under another
    /// identity
    pub fn as_app(&self, app: u64) -> Self {
        Self {
            app,
            state: Arc::clone(&self.state),
        }
    }

    pub fn fail_overwrite(&self, fail: bool) { self.state.lock().unwrap().fail_overwrite = fail; }

    pub fn fail_delete(&self, id: u64, fail: bool) {
        let mut state = self.state.lock().unwrap();
        if fail {
            state.fail_delete.insert(id);
        } else {
            state.fail_delete.remove(&id);
        }
    }

    pub fn calls(&self) -> Vec<Call> { self.state.lock().unwrap().calls.clone() }

    pub fn remote(&self, guild: Option<u64>) -> Vec<u64> {
        self.state
            .lock()
            .unwrap()
            .remote
            .get(&guild)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Session for Mock {
    type Command = Cmd;
    type CommandId = u64;
    type Error = Remote;
    type Event = Ev;
    type Guild = u64;
    type Identity = u64;

    fn identity(&self) -> u64 { self.app }

    async fn overwrite_commands(
        &self,
        guild: Option<&u64>,
        commands: Vec<Cmd>,
    ) -> Result<Vec<u64>, Remote> {
        tokio::task::yield_now().await;

        let mut state = self.state.lock().unwrap();
        let guild = guild.copied();
        state.calls.push(Call::Overwrite(
            guild,
            commands.iter().map(|c| c.0).collect(),
        ));

        if state.fail_overwrite {
            return Err(Remote);
        }

        let start = state.next_id;
        state.next_id += u64::try_from(commands.len()).unwrap();
        let ids: Vec<_> = (start..state.next_id).collect();
        state.remote.insert(guild, ids.clone());

        Ok(ids)
    }

    async fn delete_command(&self, guild: Option<&u64>, id: &u64) -> Result<(), Remote> {
        let mut state = self.state.lock().unwrap();
        let guild = guild.copied();
        state.calls.push(Call::Delete(guild, *id));

        if state.fail_delete.contains(id) {
            return Err(Remote);
        }

        let cmds = state.remote.entry(guild).or_default();
        let Some(pos) = cmds.iter().position(|c| c == id) else {
            return Err(Remote);
        };
        cmds.remove(pos);

        Ok(())
    }
}

pub type Log = Arc<Mutex<Vec<&'static str>>>;

/// Handler recording its label every time it runs
#[derive(Debug, Clone)]
pub struct Recorder {
    label: &'static str,
    log: Log,
}

impl Recorder {
    pub fn new(label: &'static str) -> (Self, Log) {
        let log = Log::default();
        (Self::with_log(label, &log), log)
    }

    pub fn with_log(label: &'static str, log: &Log) -> Self {
        Self {
            label,
            log: Arc::clone(log),
        }
    }
}

#[async_trait::async_trait]
impl Handler<Mock> for Recorder {
    async fn handle(&self, _: &Mock, _: Ev) { self.log.lock().unwrap().push(self.label); }
}
