use paths::PathContext;
use std::marker::PhantomData;
#[cfg(debug_assertions)]
use std::path::PathBuf;
use tracing_subscriber::{
    Layer, filter::LevelFilter, filter::filter_fn, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const LOG_MAIN: &str = "main";
pub const LOG_INPUT: &str = "input";
pub const LOG_NAVIGATION: &str = "navigation";
pub const LOG_VIEW: &str = "view";
pub const LOG_SCENE: &str = "scene";

/// Application infrastructure context.
///
/// Contains path management, version info, and logging infrastructure.
/// This is the core context that every application needs, regardless of
/// whether it uses Bevy or not.
pub struct AppContext {
    pub path_context: PathContext,
    pub version: &'static str,
    /// The log guard must be kept alive for the duration of the application
    /// to ensure log messages are properly flushed.
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

impl AppContext {
    pub fn app_id(&self) -> &str {
        self.path_context.app_id()
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn path_context(&self) -> &PathContext {
        &self.path_context
    }
}

/// Application metadata trait.
///
/// Define your application's identity by implementing this trait.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
}

/// Builder for creating applications with proper initialization.
pub struct AppBuilder<A: Application> {
    context: AppContext,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    /// Create a new application builder.
    ///
    /// This performs all the common initialization:
    /// - Picks the data directory (`.out/` in debug builds)
    /// - Ensures all directories exist
    /// - Initializes logging (file + console)
    pub fn new(version: &'static str) -> Result<Self, BoxError> {
        #[cfg(debug_assertions)]
        let path_context = PathContext::in_dir(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join(".out"),
            A::APP_ID,
        );
        #[cfg(not(debug_assertions))]
        let path_context = PathContext::detect(A::APP_ID);

        path_context.ensure_directories()?;

        let log_guard = init_logging(&path_context)?;

        Ok(Self {
            context: AppContext {
                path_context,
                version,
                _log_guard: log_guard,
            },
            _marker: PhantomData,
        })
    }

    /// Build a Bevy-based application.
    ///
    /// The `configure` callback receives the Bevy `App` by value and the `AppContext`,
    /// and must return the configured App. Bevy's own `LogPlugin` has to be disabled
    /// by the callback because the subscriber is already installed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let app = AppBuilder::<MyApp>::new("1.0.0")?
    ///     .build_with_bevy(|mut app, ctx| {
    ///         app.add_plugins(DefaultPlugins.build().disable::<LogPlugin>());
    ///         app
    ///     });
    /// ```
    #[cfg(feature = "bevy")]
    pub fn build_with_bevy(
        self,
        configure: impl FnOnce(bevy::prelude::App, &AppContext) -> bevy::prelude::App,
    ) -> BevyApp<A> {
        let bevy_app = bevy::prelude::App::new();
        let configured_app = configure(bevy_app, &self.context);

        BevyApp {
            context: self.context,
            app: configured_app,
            _marker: PhantomData,
        }
    }
}

/// Installs the global subscriber: non-blocking file layer plus console layer.
fn init_logging(
    path_context: &PathContext,
) -> Result<tracing_appender::non_blocking::WorkerGuard, BoxError> {
    let log_file_path = path_context.log_file_now();
    let log_dir = log_file_path
        .parent()
        .ok_or("log file path has no parent directory")?;
    let log_filename = log_file_path
        .file_name()
        .ok_or("log file path has no file name")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    #[cfg(debug_assertions)]
    let level = LevelFilter::INFO;

    #[cfg(not(debug_assertions))]
    let level = LevelFilter::WARN;

    let file_layer = fmt::Layer::default()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    let console_layer = fmt::Layer::default()
        .with_target(true)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}

/// Bevy-based application wrapper.
///
/// Contains both the infrastructure context and the Bevy App.
/// The context is kept alive to ensure logging continues working.
#[cfg(feature = "bevy")]
pub struct BevyApp<A: Application> {
    pub context: AppContext,
    pub app: bevy::prelude::App,
    _marker: PhantomData<A>,
}

#[cfg(feature = "bevy")]
impl<A: Application> BevyApp<A> {
    /// Run the Bevy application.
    pub fn run(&mut self) {
        self.app.run();
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn app_mut(&mut self) -> &mut bevy::prelude::App {
        &mut self.app
    }
}
