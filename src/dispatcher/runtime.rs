/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::broadcast::{SubscriberId, Subscription};
use crate::dispatcher::Dispatcher;
use crate::shared::{Direction, Request, RuntimeError, StatusSnapshot, ValidationError};

/***************************************/
/*               Enums                 */
/***************************************/
enum Command {
    Submit {
        request: Request,
        reply_tx: cbc::Sender<Result<(), ValidationError>>,
    },
    GenerateRandom {
        reply_tx: cbc::Sender<Request>,
    },
    Subscribe {
        reply_tx: cbc::Sender<Subscription>,
    },
    Unsubscribe {
        id: SubscriberId,
    },
    Snapshot {
        reply_tx: cbc::Sender<StatusSnapshot>,
    },
    Terminate,
}

enum Event {
    Command(Command),
    Tick,
    Terminate,
}

/**
 * Drives a `Dispatcher` in real time on its own thread.
 *
 * Every `time_unit` of wall-clock time the dispatcher clock advances by one
 * unit. Requests, subscriptions and queries arrive as commands from
 * `DispatcherHandle`s. Everything that touches the dispatcher runs on this one
 * thread, in arrival order.
 *
 * # Fields
 * - `dispatcher`:      The elevator bank being driven.
 * - `time_unit`:       Wall-clock length of one simulation time unit.
 * - `command_rx`:      Receives commands from the handles.
 */
pub struct DispatcherRuntime {
    dispatcher: Dispatcher,
    time_unit: Duration,
    command_rx: cbc::Receiver<Command>,
}

impl DispatcherRuntime {
    pub fn new(dispatcher: Dispatcher, time_unit: Duration) -> (DispatcherRuntime, DispatcherHandle) {
        let (command_tx, command_rx) = cbc::unbounded::<Command>();
        (
            DispatcherRuntime {
                dispatcher,
                time_unit,
                command_rx,
            },
            DispatcherHandle { command_tx },
        )
    }

    /// Starts the runtime on a thread named `dispatcher`. Joining the thread
    /// gives the dispatcher back.
    pub fn spawn(
        dispatcher: Dispatcher,
        time_unit: Duration,
    ) -> std::io::Result<(JoinHandle<Dispatcher>, DispatcherHandle)> {
        let (runtime, handle) = DispatcherRuntime::new(dispatcher, time_unit);
        let dispatcher_thread = Builder::new().name("dispatcher".into());
        let join_handle = dispatcher_thread.spawn(move || runtime.run())?;
        Ok((join_handle, handle))
    }

    /// Runs until a terminate command arrives or every handle is dropped.
    ///
    /// The ticker drops ticks while a command is being handled, so under
    /// load simulation time falls behind wall-clock time instead of
    /// catching up in bursts.
    pub fn run(mut self) -> Dispatcher {
        let ticker = cbc::tick(self.time_unit);

        // Main loop
        loop {
            match self.wait_for_event(&ticker) {
                Event::Command(command) => self.handle_command(command),
                Event::Tick => self.dispatcher.advance(1),
                Event::Terminate => break,
            }
        }

        info!("Dispatcher runtime terminated at {}", self.dispatcher.now());
        self.dispatcher
    }

    fn wait_for_event(&self, ticker: &cbc::Receiver<std::time::Instant>) -> Event {
        cbc::select! {
            recv(self.command_rx) -> command => {
                match command {
                    Ok(Command::Terminate) => Event::Terminate,
                    Ok(command) => Event::Command(command),
                    Err(_) => {
                        debug!("All dispatcher handles dropped");
                        Event::Terminate
                    }
                }
            },
            recv(ticker) -> _ => Event::Tick,
        }
    }

    // A reply can only fail to send if the caller gave up waiting
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit { request, reply_tx } => {
                let _ = reply_tx.send(self.dispatcher.submit(request));
            }
            Command::GenerateRandom { reply_tx } => {
                let _ = reply_tx.send(self.dispatcher.generate_random_request());
            }
            Command::Subscribe { reply_tx } => {
                let subscription = self.dispatcher.subscribe();
                let id = subscription.id;
                if reply_tx.send(subscription).is_err() {
                    self.dispatcher.unsubscribe(id);
                }
            }
            Command::Unsubscribe { id } => {
                self.dispatcher.unsubscribe(id);
            }
            Command::Snapshot { reply_tx } => {
                let _ = reply_tx.send(self.dispatcher.snapshot());
            }
            Command::Terminate => {}
        }
    }
}

/// Cloneable entry point to a running `DispatcherRuntime`.
#[derive(Clone)]
pub struct DispatcherHandle {
    command_tx: cbc::Sender<Command>,
}

impl DispatcherHandle {
    pub fn submit_request(&self, floor: i32, direction: Direction) -> Result<(), RuntimeError> {
        self.submit(Request::new(floor, direction))
    }

    pub fn submit(&self, request: Request) -> Result<(), RuntimeError> {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        self.send(Command::Submit { request, reply_tx })?;
        let result = reply_rx.recv().map_err(|_| RuntimeError::Stopped)?;
        Ok(result?)
    }

    pub fn generate_random_request(&self) -> Result<Request, RuntimeError> {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        self.send(Command::GenerateRandom { reply_tx })?;
        reply_rx.recv().map_err(|_| RuntimeError::Stopped)
    }

    pub fn subscribe(&self) -> Result<Subscription, RuntimeError> {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        self.send(Command::Subscribe { reply_tx })?;
        reply_rx.recv().map_err(|_| RuntimeError::Stopped)
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> Result<(), RuntimeError> {
        self.send(Command::Unsubscribe { id })
    }

    pub fn snapshot(&self) -> Result<StatusSnapshot, RuntimeError> {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        self.send(Command::Snapshot { reply_tx })?;
        reply_rx.recv().map_err(|_| RuntimeError::Stopped)
    }

    pub fn terminate(&self) -> Result<(), RuntimeError> {
        self.send(Command::Terminate)
    }

    fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.command_tx.send(command).map_err(|_| RuntimeError::Stopped)
    }
}
