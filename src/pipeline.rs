//! Upgrade pipeline coordinating one run
//!
//! This module provides:
//! - Workflow coordination: preflight → read → get → tidy/vendor → commit → push → pull request
//! - Early exits for the no-op states (already pinned, nothing fetched, already proposed)
//! - Stage failures reported as typed errors describing the state left behind
//!
//! Every stage either continues with a value or stops the run with a
//! `RunOutcome`; only `main` turns an error into a process exit.

use crate::domain::{
    CommitContext, DependencyRecord, PrSkipReason, PullRequestStatus, RunConfig, RunOutcome,
    UpdateReport,
};
use crate::error::AppError;
use crate::exec::{command_line, CommandRunner};
use crate::hosting::{NewPullRequest, PullRequestApi, RemoteUrl, RepoSlug};
use crate::manifest::GoModTool;
use crate::output::Reporter;
use crate::progress::Progress;
use crate::template::{CommitMessage, CommitTemplate};
use crate::vcs::Git;
use std::ops::ControlFlow;
use std::path::PathBuf;

/// Result of a stage: keep going with `T`, or stop with an outcome
type Stage<T> = Result<ControlFlow<RunOutcome, T>, AppError>;

/// Where the pull request would go, decided before anything is mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestPlan {
    /// Open a pull request on `repo`
    Submit { repo: RepoSlug, token: String },
    /// Do not open one
    Skip(PrSkipReason),
}

/// Files changed by a successful `go get`
struct Upgrade {
    new: DependencyRecord,
    target: String,
    vendored: bool,
}

/// Everything decided before the update branch is created
struct Prepared {
    upgrade: Upgrade,
    branch: String,
    message: CommitMessage,
    /// Post-update command with its tokens already rendered
    post_command: Option<Vec<String>>,
    original_branch: String,
}

/// Pipeline for coordinating an upgrade
pub struct Pipeline<'a> {
    /// Run configuration
    config: &'a RunConfig,
    /// Compiled commit template
    template: &'a CommitTemplate,
    /// Runner for `go`, `git` and the post-update command
    runner: &'a dyn CommandRunner,
    /// Hosting service used for pull requests
    api: &'a dyn PullRequestApi,
    /// Module root, where `vendor/modules.txt` is looked up
    work_dir: PathBuf,
    /// Narration
    reporter: Reporter,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline for one run
    pub fn new(
        config: &'a RunConfig,
        template: &'a CommitTemplate,
        runner: &'a dyn CommandRunner,
        api: &'a dyn PullRequestApi,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            template,
            runner,
            api,
            work_dir: work_dir.into(),
            reporter: Reporter::default(),
        }
    }

    /// Replace the narration reporter (builder pattern)
    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    fn go(&self) -> GoModTool<'a> {
        GoModTool::new(self.runner)
    }

    fn git(&self) -> Git<'a> {
        Git::new(self.runner)
    }

    /// Run the whole pipeline
    pub async fn run(&self) -> Result<RunOutcome, AppError> {
        self.preflight()?;

        let old = match self.check_requested_version()? {
            ControlFlow::Continue(old) => old,
            ControlFlow::Break(outcome) => return Ok(outcome),
        };

        let plan = self.plan_pull_request()?;

        // go.mod and go.sum are modified from here until the branch exists
        let prepared = match self.prepare(&old).map_err(AppError::modified_tree)? {
            ControlFlow::Continue(prepared) => prepared,
            ControlFlow::Break(outcome) => return Ok(outcome),
        };
        let branch = prepared.branch;

        self.commit(&branch, &prepared.message, prepared.post_command.as_deref())?;

        if self.config.push {
            self.reporter.step(&format!("Pushing {}", branch));
            self.git().push(&branch)?;
        }

        self.reporter
            .step(&format!("Checking out {}", prepared.original_branch));
        self.git().restore(&prepared.original_branch)?;

        let pull_request = self
            .submit_pull_request(plan, &branch, &prepared.message)
            .await?;

        Ok(RunOutcome::Updated(UpdateReport {
            path: self.config.path.clone(),
            old_version: old.version,
            new_version: prepared.upgrade.new.version,
            branch,
            pushed: self.config.push,
            vendored: prepared.upgrade.vendored,
            pull_request,
        }))
    }

    /// Upgrade, render everything the commit needs and check the remote
    ///
    /// Nothing here creates a branch, so any failure leaves only the files
    /// touched by `go get` behind.
    fn prepare(&self, old: &DependencyRecord) -> Stage<Prepared> {
        let upgrade = match self.upgrade(old)? {
            ControlFlow::Continue(upgrade) => upgrade,
            ControlFlow::Break(outcome) => return Ok(ControlFlow::Break(outcome)),
        };

        let context = CommitContext::new(
            &self.config.path,
            &upgrade.new.version,
            &upgrade.target,
            upgrade.vendored,
        );
        let message = self.template.render(&context)?;
        let post_command = if self.config.post_command.is_empty() {
            None
        } else {
            Some(
                self.template
                    .render_command(&self.config.post_command, &context)?,
            )
        };

        let branch = context.branch_name();
        let original_branch = match self.guard_remote_collision(&branch)? {
            ControlFlow::Continue(original) => original,
            ControlFlow::Break(outcome) => return Ok(ControlFlow::Break(outcome)),
        };

        Ok(ControlFlow::Continue(Prepared {
            upgrade,
            branch,
            message,
            post_command,
            original_branch,
        }))
    }

    /// Tidy, then refuse to touch a dirty working tree
    ///
    /// The tidy runs first because earlier CI steps (`go mod download`) can
    /// leave go.sum changes that would otherwise trip the check.
    pub fn preflight(&self) -> Result<(), AppError> {
        self.reporter.step("Tidying go.mod");
        self.go().tidy()?;

        if self.git().is_dirty()? {
            return Err(AppError::DirtyWorkingTree);
        }
        Ok(())
    }

    /// Read the pinned version and stop if it already matches the request
    fn check_requested_version(&self) -> Stage<DependencyRecord> {
        let old = self.go().read_dependency(&self.config.path)?;
        self.reporter.info(&format!("current: {}", old));

        if self.config.version.as_deref() == Some(old.version.as_str()) {
            return Ok(ControlFlow::Break(RunOutcome::AlreadyAtVersion {
                path: old.path,
                version: old.version,
            }));
        }
        Ok(ControlFlow::Continue(old))
    }

    /// Decide whether a pull request will be opened
    ///
    /// Runs before the upgrade so a malformed remote aborts without changes.
    pub fn plan_pull_request(&self) -> Result<PullRequestPlan, AppError> {
        if !self.config.push {
            return Ok(PullRequestPlan::Skip(PrSkipReason::PushDisabled));
        }
        if !self.config.pull_request {
            return Ok(PullRequestPlan::Skip(PrSkipReason::Disabled));
        }
        let Some(token) = self.config.token.clone() else {
            return Ok(PullRequestPlan::Skip(PrSkipReason::MissingToken(
                self.config.token_var.clone(),
            )));
        };

        let remote = RemoteUrl::parse(&self.git().remote_url()?)?;
        if remote.host != self.api.host() {
            return Ok(PullRequestPlan::Skip(PrSkipReason::UnsupportedHost(
                remote.host,
            )));
        }

        Ok(PullRequestPlan::Submit {
            repo: remote.slug()?,
            token,
        })
    }

    /// `go get`, then tidy and vendor unless nothing changed
    fn upgrade(&self, old: &DependencyRecord) -> Stage<Upgrade> {
        let target = self.config.upgrade_target();
        self.reporter.step(&format!("Upgrading {}", target));
        self.go().get(&target)?;

        let new = self.go().read_dependency(&self.config.path)?;
        if new.same_version(old) {
            return Ok(ControlFlow::Break(RunOutcome::AlreadyCurrent {
                path: new.path,
                version: new.version,
            }));
        }
        self.reporter
            .info(&format!("upgraded: {} -> {}", old.version, new.version));

        self.reporter.step("Tidying go.mod");
        self.go().tidy()?;

        let vendored = self.go().is_vendored(&self.work_dir)?;
        if vendored {
            self.reporter.step("Vendoring");
            self.go().vendor()?;
        }

        Ok(ControlFlow::Continue(Upgrade {
            new,
            target,
            vendored,
        }))
    }

    /// Remember the current branch and stop if the update is already on origin
    ///
    /// A hit means an earlier run proposed this exact version: the upgraded
    /// files are discarded and the run ends successfully without a branch.
    fn guard_remote_collision(&self, branch: &str) -> Stage<String> {
        let git = self.git();
        let original = git.current_branch()?;

        match git.remote_branch(branch)? {
            Some(remote_refs) => {
                self.reporter
                    .step("Remote branch exists, resetting working tree");
                git.reset_hard()?;
                Ok(ControlFlow::Break(RunOutcome::AlreadyProposed {
                    branch: branch.to_string(),
                    remote_refs,
                }))
            }
            None => Ok(ControlFlow::Continue(original)),
        }
    }

    /// Branch, stage, run the post-update command and commit
    fn commit(
        &self,
        branch: &str,
        message: &CommitMessage,
        post_command: Option<&[String]>,
    ) -> Result<(), AppError> {
        let git = self.git();

        self.reporter.step(&format!("Creating branch {}", branch));
        git.create_branch(branch)?;
        git.add_all()?;

        if let Some(command) = post_command {
            self.run_post_command(branch, command)?;
            git.add_all()?;
        }

        self.reporter.step("Committing");
        git.commit(&message.full)?;
        Ok(())
    }

    fn run_post_command(&self, branch: &str, command: &[String]) -> Result<(), AppError> {
        let Some((program, rest)) = command.split_first() else {
            return Ok(());
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        self.reporter
            .step(&format!("Running {}", command_line(program, &args)));
        self.runner
            .run(program, &args)
            .map_err(|source| AppError::PostCommand {
                branch: branch.to_string(),
                source,
            })
    }

    /// Open the pull request if the plan says so
    async fn submit_pull_request(
        &self,
        plan: PullRequestPlan,
        branch: &str,
        message: &CommitMessage,
    ) -> Result<PullRequestStatus, AppError> {
        let (repo, token) = match plan {
            PullRequestPlan::Submit { repo, token } => (repo, token),
            PullRequestPlan::Skip(reason) => {
                tracing::debug!(%reason, "skipping pull request");
                return Ok(PullRequestStatus::skipped(reason));
            }
        };

        let request = NewPullRequest {
            title: message.title.clone(),
            body: message.body.clone(),
            head: branch.to_string(),
            base: self.config.base.clone(),
        };

        let mut progress = Progress::new(self.reporter.is_enabled());
        progress.spinner("creating pull request...");
        let created = self.api.create_pull_request(&repo, &token, &request).await;
        progress.finish_and_clear();

        let created = created.map_err(|source| AppError::PullRequest {
            branch: branch.to_string(),
            source,
        })?;

        if created.url.is_none() {
            self.reporter
                .warn("pull request successfully created, but no URL was returned");
        }
        Ok(PullRequestStatus::Created { url: created.url })
    }
}
