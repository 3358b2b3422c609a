//! The pass framework: composable tree rewrites over a shared environment.

use gramble_grammar::{Grammar, GrammarKind, SymbolMap};
use gramble_source::{CellPos, InternalError, Message, MessageKind, PassOptions, Severity};
use gramble_tst::{TstCollection, TstNode, TstOp};

/// A row of literal inputs that the grammar `symbol` must accept, or reject
/// when `negated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Qualified name of the symbol under test.
    pub symbol: String,
    pub pos: Option<CellPos>,
    /// A `Sequence` of `Literal`s.
    pub input: Grammar,
    pub negated: bool,
}

/// State shared by every pass of one compilation run.
#[derive(Debug, Default)]
pub struct PassEnv {
    pub options: PassOptions,
    messages: Vec<Message>,
    tests: Vec<TestCase>,
}

impl PassEnv {
    pub fn new(options: PassOptions) -> Self {
        Self {
            options,
            messages: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Records a message. Info messages are dropped unless the options ask for them.
    pub fn report(&mut self, message: Message) {
        if message.severity() == Severity::Info && !self.options.report_info {
            log::trace!("Dropping info message: {}", message);
            return;
        }
        self.messages.push(message);
    }

    pub fn error(&mut self, kind: MessageKind, pos: Option<&CellPos>) {
        debug_assert_eq!(kind.level(), Severity::Error);
        self.report(Message::new(kind, pos.cloned()));
    }

    pub fn warn(&mut self, kind: MessageKind, pos: Option<&CellPos>) {
        debug_assert_eq!(kind.level(), Severity::Warning);
        self.report(Message::new(kind, pos.cloned()));
    }

    pub fn info(&mut self, kind: MessageKind, pos: Option<&CellPos>) {
        debug_assert_eq!(kind.level(), Severity::Info);
        self.report(Message::new(kind, pos.cloned()));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn into_parts(self) -> (Vec<Message>, Vec<TestCase>) {
        (self.messages, self.tests)
    }
}

/// What a top-level run of a pass produces.
///
/// `messages` and `tests` hold everything gathered before `output` was
/// decided, including when `output` is an internal error.
#[derive(Debug)]
pub struct PassOutput<T> {
    pub output: Result<T, InternalError>,
    pub messages: Vec<Message>,
    pub tests: Vec<TestCase>,
}

/// One stage of the compiler.
pub trait Pass {
    type Input;
    type Output;

    fn name(&self) -> &'static str;

    /// Rewrites `input`, reporting problems through `env`.
    fn transform(
        &self,
        input: Self::Input,
        env: &mut PassEnv,
    ) -> Result<Self::Output, InternalError>;

    /// Runs the pass with logging around it.
    fn run(&self, input: Self::Input, env: &mut PassEnv) -> Result<Self::Output, InternalError> {
        let before = env.messages().len();
        log::debug!("Running pass `{}`", self.name());
        let output = self.transform(input, env);
        match &output {
            Ok(_) => log::debug!(
                "Finished pass `{}` ({} new messages)",
                self.name(),
                env.messages().len() - before
            ),
            Err(err) => log::debug!("Pass `{}` failed: {}", self.name(), err),
        }
        output
    }

    /// Chains `next` after this pass.
    fn compose<P>(self, next: P) -> Compose<Self, P>
    where
        Self: Sized,
        P: Pass<Input = Self::Output>,
    {
        Compose { first: self, second: next }
    }

    /// Runs the pass over `root` in a fresh environment.
    fn get_env_and_transform(&self, root: Self::Input, options: PassOptions) -> PassOutput<Self::Output> {
        let mut env = PassEnv::new(options);
        let output = self.run(root, &mut env);
        let (messages, tests) = env.into_parts();
        PassOutput { output, messages, tests }
    }
}

/// `first` followed by `second`.
#[derive(Debug, Clone, Copy)]
pub struct Compose<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pass for Compose<A, B>
where
    A: Pass,
    B: Pass<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn name(&self) -> &'static str {
        "compose"
    }

    fn transform(&self, input: A::Input, env: &mut PassEnv) -> Result<B::Output, InternalError> {
        let middle = self.first.run(input, env)?;
        self.second.run(middle, env)
    }

    // The parts log themselves.
    fn run(&self, input: A::Input, env: &mut PassEnv) -> Result<B::Output, InternalError> {
        self.transform(input, env)
    }
}

//------------------------------------------------------------------------------
// Bottom-up rewriting
//------------------------------------------------------------------------------

/// Trees that can be rebuilt one level at a time.
pub trait Transform: Sized {
    /// Rebuilds the node with `f` applied to each direct child.
    fn map_children<F>(self, env: &mut PassEnv, f: &mut F) -> Result<Self, InternalError>
    where
        F: FnMut(Self, &mut PassEnv) -> Result<Self, InternalError>;

    /// Applies `post` to every node, children before parents.
    fn transform_bottom_up<F>(self, env: &mut PassEnv, post: &mut F) -> Result<Self, InternalError>
    where
        F: FnMut(Self, &mut PassEnv) -> Result<Self, InternalError>,
    {
        let node = self.map_children(env, &mut |child: Self, env: &mut PassEnv| {
            child.transform_bottom_up(env, post)
        })?;
        post(node, env)
    }
}

impl Transform for TstNode {
    fn map_children<F>(self, env: &mut PassEnv, f: &mut F) -> Result<Self, InternalError>
    where
        F: FnMut(Self, &mut PassEnv) -> Result<Self, InternalError>,
    {
        match self {
            TstNode::Op(TstOp { cell, op, sibling, child }) => {
                let sibling = f(*sibling, env)?;
                let child = f(*child, env)?;
                Ok(TstNode::op(cell, op, sibling, child))
            }
            TstNode::Collection(TstCollection { cell, name, children }) => {
                let children = children
                    .into_iter()
                    .map(|child| f(child, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TstNode::Collection(TstCollection { cell, name, children }))
            }
            TstNode::Grid(_) | TstNode::Empty => Ok(self),
        }
    }
}

fn map_symbols<F>(symbols: SymbolMap, env: &mut PassEnv, f: &mut F) -> Result<SymbolMap, InternalError>
where
    F: FnMut(Grammar, &mut PassEnv) -> Result<Grammar, InternalError>,
{
    let mut mapped = SymbolMap::new();
    for entry in symbols {
        let grammar = f(entry.grammar, env)?;
        mapped.insert(entry.name, grammar);
    }
    Ok(mapped)
}

impl Transform for Grammar {
    fn map_children<F>(self, env: &mut PassEnv, f: &mut F) -> Result<Self, InternalError>
    where
        F: FnMut(Self, &mut PassEnv) -> Result<Self, InternalError>,
    {
        let (kind, pos) = self.into_parts();
        let kind = match kind {
            GrammarKind::Epsilon
            | GrammarKind::Null
            | GrammarKind::Literal { .. }
            | GrammarKind::Embed { .. } => kind,
            GrammarKind::Sequence(children) => GrammarKind::Sequence(
                children
                    .into_iter()
                    .map(|child| f(child, env))
                    .collect::<Result<_, _>>()?,
            ),
            GrammarKind::Alternation(children) => GrammarKind::Alternation(
                children
                    .into_iter()
                    .map(|child| f(child, env))
                    .collect::<Result<_, _>>()?,
            ),
            GrammarKind::Rename { child, from, to } => GrammarKind::Rename {
                child: Box::new(f(*child, env)?),
                from,
                to,
            },
            GrammarKind::SingleTape { child, tape } => GrammarKind::SingleTape {
                child: Box::new(f(*child, env)?),
                tape,
            },
            GrammarKind::Collection(symbols) => GrammarKind::Collection(map_symbols(symbols, env, f)?),
            GrammarKind::Qualified(symbols) => GrammarKind::Qualified(map_symbols(symbols, env, f)?),
        };
        Ok(Grammar::new(kind).at(pos))
    }
}
