//! Deferred constraint checking.
//!
//! Name resolution records every constructed generic type as a
//! `ConstraintSite` but checks nothing, because the constraint sets and
//! extension shapes it would need may still be under construction (a type
//! parameter's constraint can mention the very extension being resolved).
//! Once every shape is sealed, this pass checks each site exactly once, in
//! the order the sites were recorded.

use crate::context::ConstraintSite;
use crate::state::CheckerState;
use tracing::{debug, trace};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_solver::{ArgumentKind, ConstraintChecker, ConstraintViolation, ConstraintViolationKind};

impl<'a> CheckerState<'a> {
    /// Check every recorded constraint site. Sites recorded while checking
    /// (there are none today) are left for a later call.
    pub(crate) fn check_constraint_sites(&mut self) {
        let sites = std::mem::take(&mut self.ctx.constraint_sites);
        debug!(sites = sites.len(), "checking constraint sites");
        let checker = ConstraintChecker::new(self.ctx.types, self.ctx.defs);
        for site in &sites {
            for violation in checker.check_instantiation(site.def, &site.args) {
                self.report_violation(site, &violation);
            }
        }
    }

    fn report_violation(&mut self, site: &ConstraintSite, violation: &ConstraintViolation) {
        let generic = self.display_def(site.def);
        let argument = self.display(violation.argument);
        let parameter = self
            .ctx
            .defs
            .get_type_params(site.def)
            .and_then(|params| params.get(violation.parameter_index as usize).map(|p| p.name))
            .map(|name| self.ctx.types.resolve_atom(name).to_string())
            .unwrap_or_default();
        trace!(generic = %generic, argument = %argument, kind = ?violation.kind, "constraint violation");

        let file = site.file.as_str();
        let report = |code: u32| (code, vec![generic.clone(), parameter.clone(), argument.clone()]);
        let (code, args) = match violation.kind {
            ConstraintViolationKind::ReferenceType => {
                report(diagnostic_codes::REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED)
            }
            ConstraintViolationKind::ValueType => {
                report(diagnostic_codes::VALUE_TYPE_CONSTRAINT_NOT_SATISFIED)
            }
            ConstraintViolationKind::NullableForReferenceType => {
                report(diagnostic_codes::NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT)
            }
            ConstraintViolationKind::NullableForNotNull => {
                report(diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT)
            }
            ConstraintViolationKind::NotTypeArgument => {
                (diagnostic_codes::TYPE_MAY_NOT_BE_TYPE_ARGUMENT, vec![argument.clone()])
            }
            ConstraintViolationKind::TypeConstraint {
                constraint,
                argument_kind,
            } => {
                let code = match argument_kind {
                    ArgumentKind::ReferenceType => diagnostic_codes::CONSTRAINT_NOT_SATISFIED_REFERENCE_TYPE,
                    ArgumentKind::ValueType => diagnostic_codes::CONSTRAINT_NOT_SATISFIED_VALUE_TYPE,
                    ArgumentKind::TypeParameter => diagnostic_codes::CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER,
                };
                let constraint = self.display(constraint);
                (
                    code,
                    vec![generic.clone(), constraint, parameter.clone(), argument.clone()],
                )
            }
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.ctx.diagnostics.report(file, site.span, code, &args);
    }
}
