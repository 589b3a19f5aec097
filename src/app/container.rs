use std::rc::Rc;

use crate::adapters::{FFprobeAdapter, FsLocalAdapter, ProcessAdapter};
use crate::app::removal_interactor::RemovalInteractor;
use crate::config_initialization::Settings;
use crate::engine::{CutStrategy, FilterGraphStrategy, SplitConcatStrategy, StrategyKind};
use crate::ports::{ExecutePort, FsPort, ProbePort};

/// Wires the production adapters behind the interactor's ports
pub struct DefaultAppContainer {
    removal_interactor: RemovalInteractor,
}

impl DefaultAppContainer {
    pub fn new(settings: &Settings) -> Self {
        let execute_port: Rc<dyn ExecutePort> = Rc::new(ProcessAdapter::new());
        let fs_port: Rc<dyn FsPort> = Rc::new(FsLocalAdapter::new());
        let probe_port: Rc<dyn ProbePort> = Rc::new(FFprobeAdapter::new(
            Rc::clone(&execute_port),
            settings.ffprobe.clone(),
        ));

        let strategy = build_strategy(settings, execute_port, Rc::clone(&fs_port));
        let removal_interactor = RemovalInteractor::new(probe_port, fs_port, strategy);

        Self { removal_interactor }
    }

    pub fn removal_interactor(&self) -> &RemovalInteractor {
        &self.removal_interactor
    }
}

/// Instantiate the configured cut strategy over the given ports
pub fn build_strategy(
    settings: &Settings,
    execute_port: Rc<dyn ExecutePort>,
    fs_port: Rc<dyn FsPort>,
) -> Rc<dyn CutStrategy> {
    match settings.strategy {
        StrategyKind::FilterGraph => {
            Rc::new(FilterGraphStrategy::new(execute_port, settings.engine.clone()))
        }
        StrategyKind::SplitConcat => Rc::new(
            SplitConcatStrategy::new(execute_port, fs_port, settings.engine.clone())
                .with_cleanup_on_failure(settings.cleanup_on_failure),
        ),
    }
}
